//! Error type for parsing.

use crate::ast::Pos;
use thiserror::Error;

/// Result type alias for syntax operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A syntax error at a source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pos}: {message}")]
pub struct ParseError {
    /// Where the problem was detected.
    pub pos: Pos,

    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn ParseError___display___prefixes_position() {
        let err = ParseError::new(Pos::new(3, 14), "expected '}'");

        assert_eq!(err.to_string(), "3:14: expected '}'");
    }
}
