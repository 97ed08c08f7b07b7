//! SQL Parser
//!
//! A hand-written recursive descent parser for the statements that host
//! condition clauses.

mod error;
#[allow(clippy::module_inception)]
mod parser;

pub use error::ParseError;
pub use parser::Parser;
