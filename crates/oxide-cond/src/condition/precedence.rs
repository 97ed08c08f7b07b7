//! Operator precedence and keyword tables for condition clauses.

use super::node::Connective;
use crate::lexer::{Token, TokenKind};

/// Precedence of the unary `NOT` connective.
pub const NOT_PRECEDENCE: u8 = 3;

/// Reserved keywords that may appear inside a condition clause.
///
/// Any other reserved keyword at bracket level zero ends the clause.
pub const ALLOWED_KEYWORDS: &[&str] = &[
    "ALL", "AND", "BETWEEN", "EXISTS", "IF", "IN", "INTERVAL", "IS", "LIKE", "MATCH", "NOT IN",
    "NOT NULL", "NOT", "NULL", "OR", "REGEXP", "RLIKE", "XOR",
];

/// Operators that extend an expression operand (`a + 1`, `price * qty`).
pub const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "%", "&", "|", "^", "<<", ">>"];

/// Returns the connective a token stands for, if it is a logical delimiter.
///
/// `NOT` is not included: it is unary and handled apart.
#[must_use]
pub fn connective(token: &Token) -> Option<Connective> {
    match (token.kind, token.value.as_str()) {
        (TokenKind::Keyword, "AND") => Some(Connective::And),
        (TokenKind::Keyword, "OR") => Some(Connective::Or),
        (TokenKind::Keyword, "XOR") => Some(Connective::Xor),
        (TokenKind::Operator, "&&") => Some(Connective::AmpAmp),
        (TokenKind::Operator, "||") => Some(Connective::PipePipe),
        _ => None,
    }
}

/// Returns true if a reserved keyword may appear inside a condition.
#[must_use]
pub fn is_allowed_keyword(token: &Token) -> bool {
    ALLOWED_KEYWORDS.contains(&token.value.as_str())
}

/// Returns true if the token ends a condition clause at bracket level zero.
#[must_use]
pub fn ends_clause(token: &Token) -> bool {
    token.is_reserved() && !is_allowed_keyword(token)
}

/// Returns true for the arithmetic and bitwise operators that join operands.
#[must_use]
pub fn is_arithmetic(token: &Token) -> bool {
    match token.kind {
        TokenKind::Operator => ARITHMETIC_OPERATORS.contains(&token.value.as_str()),
        TokenKind::Keyword => matches!(token.value.as_str(), "DIV" | "MOD"),
        _ => false,
    }
}
