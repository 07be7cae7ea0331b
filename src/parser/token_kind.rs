//! Token kinds for the lexer and parser
//!
//! This enum defines all token classes the lexer can produce. The grammar
//! subset is small, so unlike a full CST kind set there are no composite
//! node kinds here: the parser emits model elements directly.

/// All token kinds in the supported SysML v2 subset
///
/// Keywords form a closed set; an identifier that matches a keyword string
/// is always classified as that keyword (the grammar has no escaping
/// mechanism for keyword-shaped names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (comments - emitted by the lexer, filtered before parsing)
    // =========================================================================
    LINE_COMMENT = 0,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // identifier
    NUMBER, // 42, 3.14 (scan is lenient: `1.2.3` is one token)
    STRING, // "hello" (no escape handling)

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    COLON,     // :
    SEMICOLON, // ;
    EQ,        // =
    COMMA,     // ,
    DOT,       // .

    // =========================================================================
    // KEYWORDS (closed set)
    // =========================================================================
    // Namespace
    PACKAGE_KW,

    // Definitions and usages
    PART_KW,
    DEF_KW,
    PORT_KW,
    ITEM_KW,
    REQUIREMENT_KW,
    ATTRIBUTE_KW,

    // Behavior
    STATE_KW,
    TRANSITION_KW,
    ENTRY_KW,
    THEN_KW,
    FIRST_KW,
    ACCEPT_KW,
    ACTION_KW,

    // Connections
    INTERFACE_KW,
    CONNECT_KW,
    BIND_KW,

    // Direction
    INOUT_KW,
    IN_KW,
    OUT_KW,

    // Requirement body
    ID_KW,
    TEXT_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// End of input; `tokenize` always emits this as the final token.
    EOF,
}

impl TokenKind {
    /// Check if this is a trivia token (comments; whitespace never reaches
    /// the token stream)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::TEXT_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::DOT as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::IDENT | Self::NUMBER | Self::STRING)
    }
}

impl std::fmt::Display for TokenKind {
    /// Human-facing label, used verbatim in parse error messages.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::LINE_COMMENT => "line comment",
            Self::BLOCK_COMMENT => "block comment",
            Self::IDENT => "identifier",
            Self::NUMBER => "numeric literal",
            Self::STRING => "string literal",
            Self::L_BRACE => "`{`",
            Self::R_BRACE => "`}`",
            Self::L_BRACKET => "`[`",
            Self::R_BRACKET => "`]`",
            Self::L_PAREN => "`(`",
            Self::R_PAREN => "`)`",
            Self::COLON => "`:`",
            Self::SEMICOLON => "`;`",
            Self::EQ => "`=`",
            Self::COMMA => "`,`",
            Self::DOT => "`.`",
            Self::PACKAGE_KW => "`package`",
            Self::PART_KW => "`part`",
            Self::DEF_KW => "`def`",
            Self::PORT_KW => "`port`",
            Self::ITEM_KW => "`item`",
            Self::REQUIREMENT_KW => "`requirement`",
            Self::ATTRIBUTE_KW => "`attribute`",
            Self::STATE_KW => "`state`",
            Self::TRANSITION_KW => "`transition`",
            Self::ENTRY_KW => "`entry`",
            Self::THEN_KW => "`then`",
            Self::FIRST_KW => "`first`",
            Self::ACCEPT_KW => "`accept`",
            Self::ACTION_KW => "`action`",
            Self::INTERFACE_KW => "`interface`",
            Self::CONNECT_KW => "`connect`",
            Self::BIND_KW => "`bind`",
            Self::INOUT_KW => "`inout`",
            Self::IN_KW => "`in`",
            Self::OUT_KW => "`out`",
            Self::ID_KW => "`id`",
            Self::TEXT_KW => "`text`",
            Self::EOF => "end of input",
        };
        f.write_str(label)
    }
}
