//! Recursive descent parser for the SysML v2 subset
//!
//! Consumes the trivia-free token sequence through a cursor and emits
//! typed elements directly into a [`Model`]. Dispatch inside bodies uses
//! at most two tokens of lookahead (`port` vs `port def`, and so on).
//!
//! The parser is fail-fast: the first `expect` miss aborts the whole
//! parse with a [`ParseError`] and no model is returned. The only
//! recovery mechanism is local and grammar-blind: a token no body
//! production claims is dropped and scanning continues.

use smol_str::SmolStr;

use super::error::ParseError;
use super::lexer::{Token, tokenize};
use super::token_kind::TokenKind;
use crate::model::{Direction, Element, ElementData, ElementId, ElementKind, Model, PortItem};

/// Parse source text into a [`Model`].
///
/// The sole entry point of the front end. Each call constructs fresh
/// parser state (cursor, id counter from zero, empty model), so
/// independent calls are fully independent and concurrent invocations
/// from different threads cannot interfere.
pub fn parse_model(source: &str) -> Result<Model, ParseError> {
    tracing::debug!(bytes = source.len(), "parsing model source");
    let tokens: Vec<Token<'_>> = tokenize(source)
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source()?;
    let model = parser.finish();
    tracing::debug!(elements = model.len(), "parse complete");
    Ok(model)
}

/// The parser state, constructed fresh for every `parse_model` call.
struct Parser<'a> {
    /// Trivia-free token sequence, always ending in `EOF`
    tokens: &'a [Token<'a>],
    pos: usize,
    next_id: u32,
    model: Model,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::EOF)
        ));
        Self {
            tokens,
            pos: 0,
            next_id: 0,
            model: Model::new(),
        }
    }

    fn finish(self) -> Model {
        self.model
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Lookahead without consuming; `nth(0)` is the current token.
    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EOF)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(TokenKind::EOF)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Advance past the current token. The cursor never moves past `EOF`.
    fn bump(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ParseError::unexpected(kind, self.current()))
        }
    }

    /// Consume a token of `kind` and return its text.
    fn expect_text(&mut self, kind: TokenKind) -> Result<SmolStr, ParseError> {
        if self.at(kind) {
            let text = SmolStr::new(self.current().text);
            self.bump();
            Ok(text)
        } else {
            Err(ParseError::unexpected(kind, self.current()))
        }
    }

    fn expect_ident(&mut self) -> Result<SmolStr, ParseError> {
        self.expect_text(TokenKind::IDENT)
    }

    /// Consume a string literal and strip the surrounding quotes.
    /// An unterminated literal has no closing quote to strip.
    fn expect_string(&mut self) -> Result<SmolStr, ParseError> {
        let raw = self.expect_text(TokenKind::STRING)?;
        let mut value = raw.as_str();
        value = value.strip_prefix('"').unwrap_or(value);
        value = value.strip_suffix('"').unwrap_or(value);
        Ok(SmolStr::new(value))
    }

    // =========================================================================
    // Element construction
    // =========================================================================

    /// Allocate an id, register the element, and append it to the
    /// parent's children in declaration order.
    fn new_element(
        &mut self,
        name: SmolStr,
        parent: Option<ElementId>,
        data: ElementData,
    ) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.model.insert(Element::new(id, name, parent, data));
        if let Some(parent_id) = parent {
            self.model.push_child(parent_id, id);
        }
        id
    }

    /// Child ids of `id` whose element has the given kind, preserving the
    /// relative order of `children`.
    fn child_ids_of_kind(&self, id: ElementId, kind: ElementKind) -> Vec<ElementId> {
        self.model
            .get(id)
            .map(|element| {
                element
                    .children
                    .iter()
                    .copied()
                    .filter(|child| {
                        self.model.get(*child).is_some_and(|c| c.kind() == kind)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = anything* Package anything*
    ///
    /// Only a `package` keyword opens model content; everything else at
    /// top level is dropped token-by-token. The first package becomes the
    /// root; a Model has at most one.
    fn parse_source(&mut self) -> Result<(), ParseError> {
        while !self.at_eof() {
            if self.at(TokenKind::PACKAGE_KW) && self.model.root().is_none() {
                self.parse_package()?;
            } else {
                self.bump();
            }
        }
        Ok(())
    }

    /// Package = 'package' Name ('{' BodyMember* '}' | ';')
    fn parse_package(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::PACKAGE_KW)?;
        let name = self.expect_ident()?;
        let id = self.new_element(name, None, ElementData::Package);
        self.model.set_root(id);
        self.parse_block_or_semi(id)
    }

    /// Body = '{' BodyMember* '}' | ';'
    fn parse_block_or_semi(&mut self, parent: ElementId) -> Result<(), ParseError> {
        if self.eat(TokenKind::L_BRACE) {
            while !self.at(TokenKind::R_BRACE) && !self.at_eof() {
                self.parse_body_member(parent)?;
            }
            self.expect(TokenKind::R_BRACE)?;
        } else {
            self.expect(TokenKind::SEMICOLON)?;
        }
        Ok(())
    }

    /// BodyMember = ItemDef | PortDef | Port | PartDef | Part
    ///            | RequirementDef | StateDef | Connection | Binding
    ///
    /// Dispatches on the current token, peeking one further where a
    /// keyword opens both a definition and a usage. Unclaimed tokens are
    /// dropped one at a time; nested packages are not dispatched here.
    fn parse_body_member(&mut self, parent: ElementId) -> Result<(), ParseError> {
        match self.kind() {
            TokenKind::ITEM_KW if self.nth(1) == TokenKind::DEF_KW => self.parse_item_def(parent),
            TokenKind::PORT_KW if self.nth(1) == TokenKind::DEF_KW => self.parse_port_def(parent),
            TokenKind::PORT_KW => self.parse_port_usage(parent),
            TokenKind::PART_KW if self.nth(1) == TokenKind::DEF_KW => self.parse_part_def(parent),
            TokenKind::PART_KW => self.parse_part_usage(parent),
            TokenKind::REQUIREMENT_KW if self.nth(1) == TokenKind::DEF_KW => {
                self.parse_requirement_def(parent)
            }
            TokenKind::STATE_KW if self.nth(1) == TokenKind::DEF_KW => self.parse_state_def(parent),
            TokenKind::INTERFACE_KW => self.parse_interface(parent),
            TokenKind::BIND_KW => self.parse_bind(parent),
            kind => {
                tracing::trace!(
                    ?kind,
                    line = self.current().position.line,
                    "skipping unclaimed token in body"
                );
                self.bump();
                Ok(())
            }
        }
    }

    /// ItemDef = 'item' 'def' Name Body
    fn parse_item_def(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // item
        self.bump(); // def
        let name = self.expect_ident()?;
        let id = self.new_element(name, Some(parent), ElementData::ItemDef);
        self.parse_block_or_semi(id)
    }

    /// PortDef = 'port' 'def' Name ('{' PortItemLine* '}' | ';')
    /// PortItemLine = ('inout'|'in'|'out') 'item' Name ':' Type ';'
    ///
    /// Anything else inside the body is ignored token-by-token.
    fn parse_port_def(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // port
        self.bump(); // def
        let name = self.expect_ident()?;
        let id = self.new_element(name, Some(parent), ElementData::PortDef { items: Vec::new() });
        if self.eat(TokenKind::L_BRACE) {
            let mut items = Vec::new();
            while !self.at(TokenKind::R_BRACE) && !self.at_eof() {
                if let Some(direction) = self.at_direction() {
                    self.bump(); // direction keyword
                    self.expect(TokenKind::ITEM_KW)?;
                    let item_name = self.expect_ident()?;
                    self.expect(TokenKind::COLON)?;
                    let item_type = self.expect_ident()?;
                    self.expect(TokenKind::SEMICOLON)?;
                    items.push(PortItem {
                        direction,
                        name: item_name,
                        item_type,
                    });
                } else {
                    self.bump();
                }
            }
            self.expect(TokenKind::R_BRACE)?;
            if let Some(element) = self.model.get_mut(id) {
                if let ElementData::PortDef { items: slot } = &mut element.data {
                    *slot = items;
                }
            }
        } else {
            self.expect(TokenKind::SEMICOLON)?;
        }
        Ok(())
    }

    fn at_direction(&self) -> Option<Direction> {
        match self.kind() {
            TokenKind::INOUT_KW => Some(Direction::Inout),
            TokenKind::IN_KW => Some(Direction::In),
            TokenKind::OUT_KW => Some(Direction::Out),
            _ => None,
        }
    }

    /// Port = 'port' Name (':' TypeName)? Body
    fn parse_port_usage(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // port
        let name = self.expect_ident()?;
        let def_ref = if self.eat(TokenKind::COLON) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let id = self.new_element(name, Some(parent), ElementData::Port { def_ref });
        self.parse_block_or_semi(id)
    }

    /// PartDef = 'part' 'def' Name Body
    ///
    /// After the body closes, the `ports`/`parts` convenience lists are
    /// filled from the children, preserving declaration order.
    fn parse_part_def(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // part
        self.bump(); // def
        let name = self.expect_ident()?;
        let id = self.new_element(
            name,
            Some(parent),
            ElementData::PartDef {
                ports: Vec::new(),
                parts: Vec::new(),
            },
        );
        self.parse_block_or_semi(id)?;
        let ports = self.child_ids_of_kind(id, ElementKind::Port);
        let parts = self.child_ids_of_kind(id, ElementKind::Part);
        if let Some(element) = self.model.get_mut(id) {
            if let ElementData::PartDef {
                ports: port_slot,
                parts: part_slot,
            } = &mut element.data
            {
                *port_slot = ports;
                *part_slot = parts;
            }
        }
        Ok(())
    }

    /// Part = 'part' Name (':' TypeName)? ('[' Number ']')? Body
    fn parse_part_usage(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // part
        let name = self.expect_ident()?;
        let def_ref = if self.eat(TokenKind::COLON) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let multiplicity = if self.eat(TokenKind::L_BRACKET) {
            let literal = self.expect_text(TokenKind::NUMBER)?;
            self.expect(TokenKind::R_BRACKET)?;
            Some(literal)
        } else {
            None
        };
        let id = self.new_element(
            name,
            Some(parent),
            ElementData::Part {
                def_ref,
                multiplicity,
            },
        );
        self.parse_block_or_semi(id)
    }

    /// RequirementDef = 'requirement' 'def' Name RequirementBody
    /// RequirementBody recognizes only `id = "…";` and `text = "…";`;
    /// other body content is skipped.
    fn parse_requirement_def(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // requirement
        self.bump(); // def
        let name = self.expect_ident()?;
        let id = self.new_element(
            name,
            Some(parent),
            ElementData::RequirementDef {
                req_id: None,
                text: None,
            },
        );
        if self.eat(TokenKind::L_BRACE) {
            let mut req_id = None;
            let mut text = None;
            while !self.at(TokenKind::R_BRACE) && !self.at_eof() {
                match self.kind() {
                    TokenKind::ID_KW => {
                        self.bump();
                        self.expect(TokenKind::EQ)?;
                        req_id = Some(self.expect_string()?);
                        self.expect(TokenKind::SEMICOLON)?;
                    }
                    TokenKind::TEXT_KW => {
                        self.bump();
                        self.expect(TokenKind::EQ)?;
                        text = Some(self.expect_string()?);
                        self.expect(TokenKind::SEMICOLON)?;
                    }
                    _ => self.bump(),
                }
            }
            self.expect(TokenKind::R_BRACE)?;
            if let Some(element) = self.model.get_mut(id) {
                if let ElementData::RequirementDef {
                    req_id: id_slot,
                    text: text_slot,
                } = &mut element.data
                {
                    *id_slot = req_id;
                    *text_slot = text;
                }
            }
        } else {
            self.expect(TokenKind::SEMICOLON)?;
        }
        Ok(())
    }

    /// StateDef = 'state' 'def' Name StateDefBody
    ///
    /// The body recognizes `state Name {…}`, `transition …;`, and the
    /// `entry; then Initial;` shorthand; other tokens are dropped. The
    /// `states`/`transitions` convenience lists are filled afterwards.
    fn parse_state_def(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // state
        self.bump(); // def
        let name = self.expect_ident()?;
        let id = self.new_element(
            name,
            Some(parent),
            ElementData::StateDef {
                states: Vec::new(),
                transitions: Vec::new(),
            },
        );
        if self.eat(TokenKind::L_BRACE) {
            while !self.at(TokenKind::R_BRACE) && !self.at_eof() {
                match self.kind() {
                    TokenKind::STATE_KW => self.parse_state(id)?,
                    TokenKind::TRANSITION_KW => self.parse_transition(id)?,
                    TokenKind::ENTRY_KW => self.parse_initial_shorthand(id)?,
                    _ => self.bump(),
                }
            }
            self.expect(TokenKind::R_BRACE)?;
        } else {
            self.expect(TokenKind::SEMICOLON)?;
        }
        let states = self.child_ids_of_kind(id, ElementKind::State);
        let transitions = self.child_ids_of_kind(id, ElementKind::Transition);
        if let Some(element) = self.model.get_mut(id) {
            if let ElementData::StateDef {
                states: state_slot,
                transitions: transition_slot,
            } = &mut element.data
            {
                *state_slot = states;
                *transition_slot = transitions;
            }
        }
        Ok(())
    }

    /// `entry ; then InitialState ;`, the initial-state shorthand.
    ///
    /// Produces no element; the initial-state name is kept in the state
    /// machine's metadata under `"initial"`.
    fn parse_initial_shorthand(&mut self, machine: ElementId) -> Result<(), ParseError> {
        self.bump(); // entry
        self.expect(TokenKind::SEMICOLON)?;
        self.expect(TokenKind::THEN_KW)?;
        let initial = self.expect_ident()?;
        self.expect(TokenKind::SEMICOLON)?;
        if let Some(element) = self.model.get_mut(machine) {
            element.metadata.insert(SmolStr::new("initial"), initial);
        }
        Ok(())
    }

    /// State = 'state' Name ('{' StateBody '}' | ';')
    /// StateBody recognizes only `entry action Name {…}`; the action body
    /// is skipped without interpretation.
    fn parse_state(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // state
        let name = self.expect_ident()?;
        let id = self.new_element(name, Some(parent), ElementData::State { entry_action: None });
        if self.eat(TokenKind::L_BRACE) {
            let mut entry_action = None;
            while !self.at(TokenKind::R_BRACE) && !self.at_eof() {
                if self.at(TokenKind::ENTRY_KW) && self.nth(1) == TokenKind::ACTION_KW {
                    self.bump(); // entry
                    self.bump(); // action
                    entry_action = Some(self.expect_ident()?);
                    if self.at(TokenKind::L_BRACE) {
                        self.skip_balanced_braces();
                    } else {
                        self.eat(TokenKind::SEMICOLON);
                    }
                } else {
                    self.bump();
                }
            }
            self.expect(TokenKind::R_BRACE)?;
            if let Some(element) = self.model.get_mut(id) {
                if let ElementData::State { entry_action: slot } = &mut element.data {
                    *slot = entry_action;
                }
            }
        } else {
            self.expect(TokenKind::SEMICOLON)?;
        }
        Ok(())
    }

    /// Transition = 'transition' Name TransitionClause* ';'
    ///
    /// Clauses are scanned up to the semicolon: `first X` sets the
    /// source, `accept X` the trigger, `then X` the target. Clauses may
    /// appear in any order and repeat; the last occurrence of each wins.
    /// Unclaimed tokens are dropped.
    fn parse_transition(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // transition
        let name = self.expect_ident()?;
        let mut source = SmolStr::default();
        let mut target = SmolStr::default();
        let mut trigger = None;
        while !self.at(TokenKind::SEMICOLON) && !self.at_eof() {
            match self.kind() {
                TokenKind::FIRST_KW => {
                    self.bump();
                    source = self.expect_ident()?;
                }
                TokenKind::ACCEPT_KW => {
                    self.bump();
                    trigger = Some(self.expect_ident()?);
                }
                TokenKind::THEN_KW => {
                    self.bump();
                    target = self.expect_ident()?;
                }
                _ => self.bump(),
            }
        }
        self.expect(TokenKind::SEMICOLON)?;
        self.new_element(
            name,
            Some(parent),
            ElementData::Transition {
                source,
                target,
                trigger,
            },
        );
        Ok(())
    }

    /// Connection = 'interface' 'connect' '(' QualifiedName ',' QualifiedName ')' ';'
    ///
    /// Only the connect form produces an element. Any other `interface`
    /// statement is discarded token-by-token through its semicolon.
    fn parse_interface(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // interface
        if self.eat(TokenKind::CONNECT_KW) {
            self.expect(TokenKind::L_PAREN)?;
            let source = self.parse_qualified_name()?;
            self.expect(TokenKind::COMMA)?;
            let target = self.parse_qualified_name()?;
            self.expect(TokenKind::R_PAREN)?;
            self.expect(TokenKind::SEMICOLON)?;
            self.new_element(
                SmolStr::default(),
                Some(parent),
                ElementData::Connection { source, target },
            );
        } else {
            while !self.at(TokenKind::SEMICOLON) && !self.at_eof() {
                self.bump();
            }
            self.eat(TokenKind::SEMICOLON);
        }
        Ok(())
    }

    /// Binding = 'bind' QualifiedName '=' QualifiedName ';'
    fn parse_bind(&mut self, parent: ElementId) -> Result<(), ParseError> {
        self.bump(); // bind
        let source = self.parse_qualified_name()?;
        self.expect(TokenKind::EQ)?;
        let target = self.parse_qualified_name()?;
        self.expect(TokenKind::SEMICOLON)?;
        self.new_element(
            SmolStr::default(),
            Some(parent),
            ElementData::Binding { source, target },
        );
        Ok(())
    }

    /// QualifiedName = Name ('.' Name)*
    ///
    /// Stored as the dot-joined string, never resolved to element ids.
    fn parse_qualified_name(&mut self) -> Result<SmolStr, ParseError> {
        let mut name = String::from(self.expect_ident()?.as_str());
        while self.eat(TokenKind::DOT) {
            name.push('.');
            name.push_str(self.expect_ident()?.as_str());
        }
        Ok(SmolStr::new(name))
    }

    /// Consume a `{ … }` block without interpreting its contents,
    /// tracking nesting depth. Stops silently at end of input.
    fn skip_balanced_braces(&mut self) {
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.kind() {
                TokenKind::L_BRACE => depth += 1,
                TokenKind::R_BRACE => {
                    if depth <= 1 {
                        self.bump();
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }
}
