//! solast: turns Solidity source into a typed, serializable AST.
//!
//! The pipeline is [`syntax`] (pest grammar to concrete syntax tree) followed
//! by [`builder`] (concrete syntax tree to [`ast`] nodes). [`parse`] and
//! [`parse_with`] run both.

pub use crate::config::ParserConfig;
pub use crate::engine::{parse, parse_with, ParseOutput};
pub use crate::errors::{ErrorKind, SolastError};
pub use crate::ast::{Node, NodeKind};
pub use crate::syntax::SyntaxError;

pub mod ast;
pub mod builder;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod syntax;
