//! `expr [NOT] IN (...)`

use core::fmt;

use tracing::debug;

use super::simple::{render, split_top_level};
use crate::ast::Statement;
use crate::lexer::{Span, TokenList};
use crate::parser::{ParseError, Parser};

/// Contents of the `IN` brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InValues {
    /// A comma-separated value list.
    List(Vec<String>),
    /// A subquery.
    Subquery(Box<Statement>),
}

/// A membership test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InCondition {
    /// The tested expression.
    pub expr: String,
    /// `NOT IN`
    pub not: bool,
    /// Values or subquery.
    pub values: InValues,
}

impl InCondition {
    /// Parses the bracketed contents; the cursor is just past `IN`.
    ///
    /// The contents are parsed as a statement first; if that fails they are
    /// split on top-level commas.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteClause`] if a bracket is missing and
    /// [`ParseError::DepthLimitExceeded`] for subqueries nested too deeply.
    pub fn parse(
        list: &mut TokenList,
        expr: String,
        not: bool,
        span: Span,
    ) -> Result<Self, ParseError> {
        list.skip_trivia();
        let open = list.position();
        if !list.current().is_some_and(|t| t.is_operator("(")) {
            return Err(ParseError::incomplete("IN", span));
        }
        let Some(close) = list.matching_close(open) else {
            return Err(ParseError::incomplete("IN", span));
        };

        let mut inner = list.child(list.slice(open + 1, close))?;
        list.seek(close + 1);

        let values = if inner.has_significant() {
            match Parser::parse_list(&mut inner) {
                Ok(statement) => InValues::Subquery(Box::new(statement)),
                Err(err @ ParseError::DepthLimitExceeded { .. }) => return Err(err),
                Err(err) => {
                    debug!("IN contents are not a statement ({err}), reading a value list");
                    InValues::List(split_top_level(inner.tokens()).into_iter().map(render).collect())
                }
            }
        } else {
            InValues::List(Vec::new())
        };

        Ok(Self { expr, not, values })
    }
}

impl fmt::Display for InCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}IN (", self.expr, if self.not { "NOT " } else { "" })?;
        match &self.values {
            InValues::List(values) => f.write_str(&values.join(", "))?,
            InValues::Subquery(statement) => write!(f, "{statement}")?,
        }
        f.write_str(")")
    }
}
