//! # sysgraph-base
//!
//! Core library for parsing a SysML v2 subset into an identity-keyed
//! element graph for architecture views.
//!
//! The crate is a single-pass textual front end: a lexer turns source text
//! into a flat token sequence, a recursive-descent parser turns the tokens
//! into a [`Model`], and a small query layer lets rendering and UI
//! collaborators traverse the result. Parsing is fail-fast: the first
//! malformed construct aborts the whole parse with a [`ParseError`].
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → Element graph, Model store, read-only queries
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, keyword table
//!   ↓
//! base      → Primitives (Position)
//! ```
//!
//! ## Example
//!
//! ```
//! let model = sysgraph::parse_model("package Demo { part def Engine; }").unwrap();
//! assert_eq!(model.root_elements().len(), 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → model)
// ============================================================================

/// Foundation types: line/column positions
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, keyword table
pub mod parser;

/// Model: element graph and read-only query layer
pub mod model;

// Re-export the keyword table for UI collaborators
pub use parser::keywords;

// Re-export the programmatic boundary
pub use base::Position;
pub use model::{Direction, Element, ElementData, ElementId, ElementKind, Model, PortItem};
pub use parser::{ParseError, Token, TokenKind, parse_model, tokenize};
