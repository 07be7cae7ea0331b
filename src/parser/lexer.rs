//! Logos-based lexer for the SysML v2 subset
//!
//! Fast tokenization using the logos crate. The lexer is total: it never
//! raises an error. Unrecognized characters are dropped (recorded at
//! `trace` level), and unterminated strings and block comments consume to
//! the end of the input.

use logos::Logos;
use text_size::TextSize;

use super::keywords;
use super::token_kind::TokenKind;
use crate::base::Position;

/// A token with its kind, text, and position
///
/// `offset` is the byte offset of the token start; `position` is the same
/// location as a 1-indexed line/column pair for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
    pub position: Position,
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Iterates over non-whitespace tokens while tracking line/column for
/// every scanned byte, including skipped whitespace and dropped
/// characters, so positions stay accurate.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position of the cursor (the end of the input once the
    /// iterator is exhausted).
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance_over(&mut self, text: &str) {
        self.offset += text.len() as u32;
        for byte in text.bytes() {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let logos_token = self.inner.next()?;
            let text = self.inner.slice();
            let offset = TextSize::new(self.offset);
            let position = Lexer::position(self);
            self.advance_over(text);

            let kind = match logos_token {
                Ok(LogosToken::Whitespace) => continue,
                Ok(t) => t.classify(text),
                Err(()) => {
                    // Total lexing: anything unrecognized is dropped, not
                    // reported. The trace record keeps the drop observable.
                    tracing::trace!(
                        line = position.line,
                        column = position.column,
                        text,
                        "dropping unrecognized character"
                    );
                    continue;
                }
            };

            return Some(Token {
                kind,
                text,
                offset,
                position,
            });
        }
    }
}

/// Tokenize an entire string, appending the `EOF` token.
///
/// Comments are included in the output; callers filter trivia before
/// handing the sequence to the parser.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    for token in &mut lexer {
        tokens.push(token);
    }
    tokens.push(Token {
        kind: TokenKind::EOF,
        text: "",
        offset: TextSize::of(input),
        position: lexer.position(),
    });
    tokens
}

/// Logos token enum - maps to TokenKind
///
/// Identifiers are classified against the closed keyword table after the
/// scan, so keywords never reach the parser as plain identifiers.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // Optional terminator: an unterminated block comment swallows the rest
    // of the input instead of failing.
    #[regex(r"/\*([^*]|\*[^/])*(\*/)?")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Digits and dots, no validation: `1.2.3` is one token.
    #[regex(r"[0-9][0-9.]*")]
    #[regex(r"\.[0-9][0-9.]*")]
    Number,

    // No escape handling; a literal `"` cannot appear inside a string.
    // Unterminated strings run to end of input.
    #[regex(r#""[^"]*"?"#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}

impl LogosToken {
    fn classify(self, text: &str) -> TokenKind {
        match self {
            LogosToken::Whitespace => unreachable!("whitespace is skipped before classification"),
            LogosToken::LineComment => TokenKind::LINE_COMMENT,
            LogosToken::BlockComment => TokenKind::BLOCK_COMMENT,
            LogosToken::Ident => keywords::kind_for(text).unwrap_or(TokenKind::IDENT),
            LogosToken::Number => TokenKind::NUMBER,
            LogosToken::String => TokenKind::STRING,
            LogosToken::LBrace => TokenKind::L_BRACE,
            LogosToken::RBrace => TokenKind::R_BRACE,
            LogosToken::LBracket => TokenKind::L_BRACKET,
            LogosToken::RBracket => TokenKind::R_BRACKET,
            LogosToken::LParen => TokenKind::L_PAREN,
            LogosToken::RParen => TokenKind::R_PAREN,
            LogosToken::Colon => TokenKind::COLON,
            LogosToken::Semicolon => TokenKind::SEMICOLON,
            LogosToken::Eq => TokenKind::EQ,
            LogosToken::Comma => TokenKind::COMMA,
            LogosToken::Dot => TokenKind::DOT,
        }
    }
}
