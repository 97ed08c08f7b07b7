//! # oxide-cond
//!
//! A parser for SQL condition clauses (`WHERE`, `HAVING` and `ON`).
//!
//! This crate provides:
//! - A lexer that keeps trivia and merges compound keywords (`NOT IN`, `LEFT JOIN`, ...)
//! - A shunting-yard builder that turns a clause into a [`ConditionNode`] tree
//! - A classifier that recognizes comparison, `BETWEEN`, `IS NULL`, `IN` and
//!   `LIKE` leaves, keeping anything else verbatim
//! - A small statement parser (`SELECT`, `UPDATE`, `DELETE`) hosting the clauses
//!
//! ## Parsing a Condition
//!
//! ```rust
//! use oxide_cond::{Condition, ConditionNode};
//!
//! let tree = Condition::parse_str("a = ?0 AND NOT (b IS NULL OR c IN (1, 2))").unwrap();
//! assert_eq!(tree.tag(), "AND");
//! assert_eq!(tree.leaf_count(), 3);
//! assert!(matches!(tree.right(), Some(ConditionNode::Not(_))));
//!
//! // Rendering is a fixed point of parsing.
//! assert_eq!(tree.to_string(), "a = ?0 AND NOT (b IS NULL OR c IN (1, 2))");
//! ```
//!
//! ## Parsing a Statement
//!
//! ```rust
//! use oxide_cond::{Parser, Statement};
//!
//! let statement = Parser::new("SELECT id FROM users WHERE active = 1 LIMIT 10")
//!     .parse_statement()
//!     .unwrap();
//! assert!(matches!(statement, Statement::Select(_)));
//! assert_eq!(statement.conditions().len(), 1);
//! ```

pub mod ast;
pub mod condition;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod term;

pub use ast::Statement;
pub use condition::{Condition, ConditionNode, SimpleCondition};
pub use lexer::{Lexer, Token, TokenKind, TokenList};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{ParseError, Parser};
