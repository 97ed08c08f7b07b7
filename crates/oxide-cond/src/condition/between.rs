//! `expr [NOT] BETWEEN lower AND upper`

use core::fmt;

use super::simple::{render, take_unit};
use crate::lexer::{Span, TokenList};
use crate::parser::ParseError;

/// A range test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BetweenCondition {
    /// The tested expression.
    pub expr: String,
    /// `NOT BETWEEN`
    pub not: bool,
    /// Lower bound.
    pub lower_bound: String,
    /// Upper bound.
    pub upper_bound: String,
}

impl BetweenCondition {
    /// Parses both bounds; the cursor is just past `BETWEEN`.
    ///
    /// The bounds are split on the first `AND` outside brackets.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteClause`] if the `AND` or a bound is missing.
    pub fn parse(
        list: &mut TokenList,
        expr: String,
        not: bool,
        span: Span,
    ) -> Result<Self, ParseError> {
        let mut lower = Vec::new();
        let mut found_and = false;

        while let Some(token) = list.current() {
            if token.is_keyword("AND") {
                found_and = true;
                list.advance();
                break;
            }
            take_unit(list, &mut lower);
        }

        let mut upper = Vec::new();
        while !list.is_at_end() {
            take_unit(list, &mut upper);
        }

        let lower_bound = render(&lower);
        let upper_bound = render(&upper);
        if !found_and || lower_bound.is_empty() || upper_bound.is_empty() {
            return Err(ParseError::incomplete("BETWEEN", span));
        }

        Ok(Self {
            expr,
            not,
            lower_bound,
            upper_bound,
        })
    }
}

impl fmt::Display for BetweenCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}BETWEEN {} AND {}",
            self.expr,
            if self.not { "NOT " } else { "" },
            self.lower_bound,
            self.upper_bound
        )
    }
}
