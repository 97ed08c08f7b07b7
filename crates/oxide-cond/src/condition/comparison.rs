//! Comparisons, including chains such as `a < b < c`.

use core::fmt;

use super::simple::{render, take_unit};
use crate::lexer::{TokenKind, TokenList};
use crate::parser::ParseError;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `!=`
    BangEq,
    /// `^=`
    CaretEq,
    /// `<>`
    LtGt,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
}

impl ComparisonOp {
    /// Parses an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            "!=" => Some(Self::BangEq),
            "^=" => Some(Self::CaretEq),
            "<>" => Some(Self::LtGt),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::GtEq),
            "<=" => Some(Self::LtEq),
            _ => None,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::BangEq => "!=",
            Self::CaretEq => "^=",
            Self::LtGt => "<>",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComparisonRhs {
    /// A plain operand.
    Value(String),
    /// The rest of a chain: `b < c` in `a < b < c`.
    Chained(Box<ComparisonCondition>),
}

/// `lhs op rhs`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonCondition {
    /// Left operand.
    pub lhs: String,
    /// The operator.
    pub op: ComparisonOp,
    /// Negated by a leading `NOT` inside the leaf.
    pub not: bool,
    /// Right operand or the rest of the chain.
    pub rhs: ComparisonRhs,
}

impl ComparisonCondition {
    /// Creates a plain, non-negated comparison.
    #[must_use]
    pub fn new(lhs: impl Into<String>, op: ComparisonOp, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            op,
            not: false,
            rhs: ComparisonRhs::Value(rhs.into()),
        }
    }

    /// Parses the right-hand side; the cursor is just past `op`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteClause`] when an operand is missing and
    /// [`ParseError::DepthLimitExceeded`] for chains longer than the nesting limit.
    pub fn parse(
        list: &mut TokenList,
        lhs: String,
        op: ComparisonOp,
        not: bool,
    ) -> Result<Self, ParseError> {
        Self::parse_chain(list, lhs, op, not, 0)
    }

    fn parse_chain(
        list: &mut TokenList,
        lhs: String,
        op: ComparisonOp,
        not: bool,
        level: usize,
    ) -> Result<Self, ParseError> {
        list.check_depth(level)?;

        let op_span = list.current_span();
        let mut operand = Vec::new();
        let mut next_op = None;

        while let Some(token) = list.current() {
            if token.kind == TokenKind::Operator {
                if let Some(chained) = ComparisonOp::from_symbol(&token.value) {
                    next_op = Some(chained);
                    list.advance();
                    break;
                }
            }
            take_unit(list, &mut operand);
        }

        let operand = render(&operand);
        if operand.is_empty() {
            return Err(ParseError::incomplete(op.as_str(), op_span));
        }

        let rhs = match next_op {
            Some(chained) => ComparisonRhs::Chained(Box::new(Self::parse_chain(
                list,
                operand,
                chained,
                false,
                level + 1,
            )?)),
            None => ComparisonRhs::Value(operand),
        };

        Ok(Self { lhs, op, not, rhs })
    }

    /// Number of comparisons in the chain.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut rhs = &self.rhs;
        while let ComparisonRhs::Chained(next) = rhs {
            len += 1;
            rhs = &next.rhs;
        }
        len
    }
}

impl fmt::Display for ComparisonCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not {
            f.write_str("NOT ")?;
        }
        write!(f, "{} {} ", self.lhs, self.op)?;
        match &self.rhs {
            ComparisonRhs::Value(value) => f.write_str(value),
            ComparisonRhs::Chained(next) => write!(f, "{next}"),
        }
    }
}
