//! `expr [NOT] LIKE pattern [ESCAPE char]`

use core::fmt;

use super::simple::{render, take_unit};
use crate::lexer::{Span, TokenList};
use crate::parser::ParseError;

/// A pattern match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LikeCondition {
    /// The tested expression.
    pub expr: String,
    /// `NOT LIKE`
    pub not: bool,
    /// The pattern, including any `ESCAPE` part.
    pub pattern: String,
}

impl LikeCondition {
    /// Takes the rest of the leaf as the pattern; the cursor is just past `LIKE`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteClause`] if the pattern is missing.
    pub fn parse(
        list: &mut TokenList,
        expr: String,
        not: bool,
        span: Span,
    ) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        while !list.is_at_end() {
            take_unit(list, &mut tokens);
        }

        let pattern = render(&tokens);
        if pattern.is_empty() {
            return Err(ParseError::incomplete("LIKE", span));
        }

        Ok(Self { expr, not, pattern })
    }
}

impl fmt::Display for LikeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}LIKE {}",
            self.expr,
            if self.not { "NOT " } else { "" },
            self.pattern
        )
    }
}
