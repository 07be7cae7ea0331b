//! The closed keyword table of the supported SysML v2 subset.
//!
//! The lexer consults [`kind_for`] to classify every scanned identifier;
//! UI collaborators use [`KEYWORDS`] for syntax highlighting and
//! completion. The set is closed: names that collide with a keyword cannot
//! be written in this grammar.

use super::token_kind::TokenKind;

/// Every keyword the grammar knows, paired with its token kind.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("package", TokenKind::PACKAGE_KW),
    ("part", TokenKind::PART_KW),
    ("def", TokenKind::DEF_KW),
    ("port", TokenKind::PORT_KW),
    ("item", TokenKind::ITEM_KW),
    ("requirement", TokenKind::REQUIREMENT_KW),
    ("attribute", TokenKind::ATTRIBUTE_KW),
    ("state", TokenKind::STATE_KW),
    ("transition", TokenKind::TRANSITION_KW),
    ("entry", TokenKind::ENTRY_KW),
    ("then", TokenKind::THEN_KW),
    ("first", TokenKind::FIRST_KW),
    ("accept", TokenKind::ACCEPT_KW),
    ("action", TokenKind::ACTION_KW),
    ("interface", TokenKind::INTERFACE_KW),
    ("connect", TokenKind::CONNECT_KW),
    ("bind", TokenKind::BIND_KW),
    ("inout", TokenKind::INOUT_KW),
    ("in", TokenKind::IN_KW),
    ("out", TokenKind::OUT_KW),
    ("id", TokenKind::ID_KW),
    ("text", TokenKind::TEXT_KW),
];

/// Look up the keyword kind for an identifier, if it is one.
pub fn kind_for(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| *kw == text)
        .map(|(_, kind)| *kind)
}

/// Check whether an identifier spelling is reserved.
pub fn is_keyword(text: &str) -> bool {
    kind_for(text).is_some()
}
