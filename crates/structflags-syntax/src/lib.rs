//! structflags-syntax - Go syntax front end for struct-to-pflags
//!
//! Go source is parsed with tree-sitter and lowered into a
//! declaration-level syntax model:
//! - [`parse_file`] for whole files (package clause, imports, declarations)
//! - [`parse_expr`] for standalone expressions
//! - [`ast`] for the node types, with comments attached to struct fields
//! - [`visit::Visit`] for read-only traversal
//!
//! Function bodies are checked for syntax but not lowered, so only
//! declarations and the types and initializers they contain are modelled.

pub mod ast;
mod builder;
mod error;
mod parser;
pub mod visit;

pub use ast::Pos;
pub use error::{ParseError, ParseResult};
pub use parser::{parse_expr, parse_file};
