//! Parse error type
//!
//! One error kind covers the whole front end: the lexer is total and never
//! reports, so the only failure is the parser finding the wrong token at
//! the cursor.

use smol_str::SmolStr;
use thiserror::Error;

use super::lexer::Token;
use super::token_kind::TokenKind;

/// Parse failure raised at the first malformed construct.
///
/// Carries the token kind the grammar required, the token actually found
/// (kind and text), and the 1-indexed line of the found token. The parser
/// never recovers from its own errors: the whole `parse_model` call fails
/// and no partial model is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} on line {line}")]
pub struct ParseError {
    /// Token kind the grammar required at the cursor
    pub expected: TokenKind,
    /// Token kind actually present
    pub found: TokenKind,
    /// Source text of the found token (empty at end of input)
    pub text: SmolStr,
    /// 1-indexed line of the found token
    pub line: u32,
}

impl ParseError {
    pub(crate) fn unexpected(expected: TokenKind, found: &Token<'_>) -> Self {
        Self {
            expected,
            found: found.kind,
            text: SmolStr::new(found.text),
            line: found.position.line,
        }
    }
}
