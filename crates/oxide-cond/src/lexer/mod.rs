//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written, MySQL-flavoured lexer that produces
//! every token of the input (whitespace and comments included) and the
//! [`TokenList`] cursor the parsers share.

mod list;
mod span;
mod token;
mod tokenizer;

pub use list::TokenList;
pub use span::Span;
pub use token::{keyword_flags, Token, TokenFlags, TokenKind, COMPOUND_KEYWORDS};
pub use tokenizer::Lexer;
