//! Syntax front end: the Solidity grammar, its concrete syntax tree, and the
//! side channel that collects syntax errors.
//!
//! The AST builders only ever see the CST defined in [`cst`]; the pest grammar
//! is one way of producing it.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cst;
pub mod parser;

pub use cst::{Cst, CstNode, Production, Token};
pub use parser::parse_cst;

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A syntax error reported by the front end.
///
/// Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, Diagnostic)]
#[error("line {line}:{column} {message}")]
#[diagnostic(code(solast::syntax::error))]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Receives syntax errors while the front end runs.
///
/// Errors are accumulated, never thrown: the caller decides what to do with
/// them once the whole input has been processed.
pub trait SyntaxErrorListener {
    fn syntax_error(&mut self, line: usize, column: usize, message: String);
}

impl SyntaxErrorListener for Vec<SyntaxError> {
    fn syntax_error(&mut self, line: usize, column: usize, message: String) {
        self.push(SyntaxError {
            line,
            column,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_accumulates_in_order() {
        let mut errors: Vec<SyntaxError> = Vec::new();
        errors.syntax_error(1, 4, "first".into());
        errors.syntax_error(3, 0, "second".into());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].to_string(), "line 3:0 second");
    }
}
