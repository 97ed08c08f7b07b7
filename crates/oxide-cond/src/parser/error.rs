//! Parser error types.

use thiserror::Error;

use crate::lexer::Span;

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A grammar ran out of tokens before its required parts were found
    /// (e.g. `a BETWEEN 1` without `AND`).
    #[error("Incomplete {construct} clause at position {span}")]
    IncompleteClause {
        /// The construct being parsed (`BETWEEN`, `IN`, `=`, ...).
        construct: String,
        /// Location of the incomplete construct.
        span: Span,
    },

    /// A connective had fewer operands than it needs.
    #[error("Missing operand for {operator} at position {span}")]
    MissingOperand {
        /// The connective (`AND`, `NOT`, ...).
        operator: String,
        /// Location of the connective.
        span: Span,
    },

    /// More than one condition tree was left once the clause was consumed.
    #[error("Malformed condition: {remaining} sub-conditions are not joined by a connective")]
    MalformedNesting {
        /// Number of trees left on the output stack.
        remaining: usize,
    },

    /// A bracket without its partner.
    #[error("Unbalanced bracket at position {span}")]
    UnbalancedBracket {
        /// Location of the unmatched bracket.
        span: Span,
    },

    /// The clause contained no condition.
    #[error("Empty condition at position {span}")]
    EmptyCondition {
        /// Where the condition was expected.
        span: Span,
    },

    /// Nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions).
    #[error("Nesting depth limit of {limit} exceeded")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// The statement grammar found an unexpected token.
    #[error("Unexpected token: expected {expected}, found {found} at position {span}")]
    Unexpected {
        /// What the grammar expected.
        expected: String,
        /// The source text that was found instead.
        found: String,
        /// Location of the offending token.
        span: Span,
    },

    /// The statement grammar ran off the end of the input.
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// What the grammar expected.
        expected: String,
    },
}

impl ParseError {
    /// Creates an "incomplete clause" error.
    #[must_use]
    pub fn incomplete(construct: impl Into<String>, span: Span) -> Self {
        Self::IncompleteClause {
            construct: construct.into(),
            span,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Returns the location of the error, when it has one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::IncompleteClause { span, .. }
            | Self::MissingOperand { span, .. }
            | Self::UnbalancedBracket { span }
            | Self::EmptyCondition { span }
            | Self::Unexpected { span, .. } => Some(*span),
            Self::MalformedNesting { .. }
            | Self::DepthLimitExceeded { .. }
            | Self::UnexpectedEof { .. } => None,
        }
    }
}
