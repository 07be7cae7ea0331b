/// Position tracking for tokens and diagnostics
///
/// Stores the source location (line/column) of lexed tokens so parse
/// errors can point at the offending line. Positions are 1-indexed: the
/// first character of a source file is line 1, column 1. This matches how
/// editors and compilers display locations to people; collaborators that
/// speak a 0-indexed protocol subtract at their boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
