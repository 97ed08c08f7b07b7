//! `expr IS [NOT] NULL`

use core::fmt;

use crate::lexer::{Span, TokenList};
use crate::parser::ParseError;

/// A null test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NullCondition {
    /// The tested expression.
    pub expr: String,
    /// `IS NOT NULL`
    pub not: bool,
}

impl NullCondition {
    /// Creates a null test.
    #[must_use]
    pub fn new(expr: impl Into<String>, not: bool) -> Self {
        Self {
            expr: expr.into(),
            not,
        }
    }

    /// Parses the rest of the test; the cursor is just past `IS`.
    ///
    /// A `NOT` flips `not`, which may already be set by a leading `NOT`.
    /// Returns `Ok(None)` with the cursor untouched when `IS` is followed by
    /// something other than a null test (`IS TRUE`, `IS UNKNOWN`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteClause`] when the input ends before `NULL`.
    pub fn parse(
        list: &mut TokenList,
        expr: String,
        mut not: bool,
        span: Span,
    ) -> Result<Option<Self>, ParseError> {
        let start = list.position();

        loop {
            let Some(token) = list.next_significant() else {
                return Err(ParseError::incomplete("IS", span));
            };
            match token.value.as_str() {
                _ if !token.is_reserved() => break,
                "NULL" => return Ok(Some(Self { expr, not })),
                "NOT NULL" => return Ok(Some(Self { expr, not: !not })),
                "NOT" => not = !not,
                _ => break,
            }
        }

        list.seek(start);
        Ok(None)
    }
}

impl fmt::Display for NullCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}NULL",
            self.expr,
            if self.not { "NOT " } else { "" }
        )
    }
}
