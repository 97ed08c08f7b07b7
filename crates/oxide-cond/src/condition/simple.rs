//! Leaf classification.

use core::fmt;

use tracing::trace;

use super::between::BetweenCondition;
use super::comparison::{ComparisonCondition, ComparisonOp};
use super::in_condition::InCondition;
use super::like::LikeCondition;
use super::null::NullCondition;
use super::precedence::is_arithmetic;
use super::unknown::NotYetImplementedCondition;
use crate::lexer::{Token, TokenKind, TokenList};
use crate::parser::ParseError;

/// A classified leaf condition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimpleCondition {
    /// `lhs op rhs`, possibly chained.
    Comparison(ComparisonCondition),
    /// `expr [NOT] BETWEEN lower AND upper`
    Between(BetweenCondition),
    /// `expr IS [NOT] NULL`
    Null(NullCondition),
    /// `expr [NOT] IN (...)`
    In(InCondition),
    /// `expr [NOT] LIKE pattern`
    Like(LikeCondition),
    /// Anything no grammar recognized, kept verbatim.
    NotYetImplemented(NotYetImplementedCondition),
}

impl SimpleCondition {
    /// Classifies the leaf window in `list` and parses it with the matching grammar.
    ///
    /// The whole window is consumed. When no grammar applies, or a grammar
    /// leaves significant tokens behind, the cursor rewinds and the window
    /// becomes a [`NotYetImplementedCondition`].
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when a recognized grammar is incomplete
    /// (e.g. `a BETWEEN 1`) or nesting exceeds the configured limit.
    pub fn identify(list: &mut TokenList) -> Result<Self, ParseError> {
        let start = list.position();

        match Self::dispatch(list)? {
            Some(condition) if !list.has_significant() => {
                list.seek(list.len());
                Ok(condition)
            }
            _ => {
                trace!("Leaf falls back to the catch-all");
                list.seek(start);
                Ok(Self::NotYetImplemented(NotYetImplementedCondition::parse(list)))
            }
        }
    }

    /// Picks the grammar from the expression and the keyword that follows it.
    fn dispatch(list: &mut TokenList) -> Result<Option<Self>, ParseError> {
        list.skip_trivia();
        let prefix_not = list.current().is_some_and(|t| t.is_keyword("NOT"));
        if prefix_not {
            list.advance();
        }

        let Some(expr_tokens) = capture_expression(list) else {
            return Ok(None);
        };
        let expr = render(&expr_tokens);

        list.skip_trivia();
        let infix_not = list.current().is_some_and(|t| t.is_keyword("NOT"));
        if infix_not {
            list.advance();
            list.skip_trivia();
        }

        let Some(keyword) = list.current().cloned() else {
            return Ok(None);
        };
        list.advance();

        let not = prefix_not ^ infix_not;
        let condition = match (keyword.kind, keyword.value.as_str()) {
            (TokenKind::Operator, symbol) if !infix_not => match ComparisonOp::from_symbol(symbol) {
                Some(op) => Self::Comparison(ComparisonCondition::parse(list, expr, op, not)?),
                None => return Ok(None),
            },
            (TokenKind::Keyword, "BETWEEN") => {
                Self::Between(BetweenCondition::parse(list, expr, not, keyword.span)?)
            }
            (TokenKind::Keyword, "IS") if !infix_not => {
                match NullCondition::parse(list, expr, not, keyword.span)? {
                    Some(condition) => Self::Null(condition),
                    None => return Ok(None),
                }
            }
            (TokenKind::Keyword, "IN") => {
                Self::In(InCondition::parse(list, expr, not, keyword.span)?)
            }
            (TokenKind::Keyword, "NOT IN") if !infix_not => {
                Self::In(InCondition::parse(list, expr, !not, keyword.span)?)
            }
            (TokenKind::Keyword, "LIKE") => {
                Self::Like(LikeCondition::parse(list, expr, not, keyword.span)?)
            }
            _ => return Ok(None),
        };

        Ok(Some(condition))
    }

    /// The grammar name, as used in logs and term output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Comparison(_) => "comparison",
            Self::Between(_) => "between",
            Self::Null(_) => "null",
            Self::In(_) => "in",
            Self::Like(_) => "like",
            Self::NotYetImplemented(_) => "unknown",
        }
    }
}

impl fmt::Display for SimpleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(c) => write!(f, "{c}"),
            Self::Between(c) => write!(f, "{c}"),
            Self::Null(c) => write!(f, "{c}"),
            Self::In(c) => write!(f, "{c}"),
            Self::Like(c) => write!(f, "{c}"),
            Self::NotYetImplemented(c) => write!(f, "{c}"),
        }
    }
}

/// Renders leaf tokens as normalized text.
///
/// Comments are dropped, whitespace runs become one space and the ends are trimmed.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut pending_space = false;

    for token in tokens {
        match token.kind {
            TokenKind::Comment => {}
            TokenKind::Whitespace => pending_space = true,
            _ => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push_str(&token.text);
            }
        }
    }

    out
}

/// Renders tokens exactly as written, trimmed at both ends.
#[must_use]
pub fn render_raw(tokens: &[Token]) -> String {
    let raw: String = tokens.iter().map(|t| t.text.as_str()).collect();
    raw.trim().to_string()
}

/// Moves one unit past the cursor into `out`.
///
/// A unit is a single token, a bracketed group up to its matching `)` or a
/// `CASE ... END` expression. An unterminated group takes the rest of the list.
pub fn take_unit(list: &mut TokenList, out: &mut Vec<Token>) {
    let start = list.position();
    let Some(token) = list.current() else {
        return;
    };

    let end = if token.is_operator("(") {
        list.matching_close(start)
    } else if token.is_keyword("CASE") {
        list.matching_end(start)
    } else {
        Some(start)
    };
    let end = end.map_or(list.len(), |i| i + 1);

    out.extend(list.slice(start, end));
    list.seek(end);
}

/// Returns true if the token can start an operand.
fn is_operand(token: &Token) -> bool {
    match token.kind {
        TokenKind::Identifier | TokenKind::Literal | TokenKind::Hole => true,
        TokenKind::Keyword => !token.is_reserved() || token.is_function() || token.is_keyword("CASE"),
        _ => false,
    }
}

/// Captures one operand: a value, a function call or a `CASE` expression.
fn capture_operand(list: &mut TokenList, out: &mut Vec<Token>) -> bool {
    let start = list.position();
    list.skip_trivia();
    let Some(token) = list.current() else {
        return false;
    };
    if !is_operand(token) {
        return false;
    }
    let callable = matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword);
    let reserved_function = token.is_reserved() && token.is_function();

    out.extend(list.slice(start, list.position()));
    take_unit(list, out);

    let call = list.current().is_some_and(|t| t.is_operator("("));
    if callable && call {
        take_unit(list, out);
    } else if reserved_function {
        // `LEFT`, `IF`, ... are only operands when called
        return false;
    }
    true
}

/// Captures the left-hand expression of a simple condition.
///
/// Operands may be joined by arithmetic operators (`a + 1`). Returns `None`
/// if the cursor does not start with an expression.
pub fn capture_expression(list: &mut TokenList) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    if !capture_operand(list, &mut tokens) {
        return None;
    }

    loop {
        let Some(next) = list.significant_index(list.position()) else {
            break;
        };
        if !list.get(next).is_some_and(is_arithmetic) {
            break;
        }
        let mark = list.position();
        let trivia = list.slice(mark, next);
        list.seek(next);
        let mut operator = Vec::new();
        take_unit(list, &mut operator);
        let mut operand = Vec::new();
        if !capture_operand(list, &mut operand) {
            list.seek(mark);
            return None;
        }
        tokens.extend(trivia);
        tokens.extend(operator);
        tokens.extend(operand);
    }

    Some(tokens)
}

/// Splits `tokens` on commas outside brackets.
#[must_use]
pub fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut level = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.is_operator("(") {
            level += 1;
        } else if token.is_operator(")") {
            level = level.saturating_sub(1);
        } else if level == 0 && token.is_operator(",") {
            parts.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    parts.push(&tokens[start..]);
    parts
}
