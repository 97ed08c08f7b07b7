//! Condition tree builder.
//!
//! A shunting-yard pass over the clause: simple-condition tokens are buffered
//! into a leaf window, connectives go through an operator stack and completed
//! sub-trees collect on an output stack.

use std::mem;

use tracing::{debug, trace};

use super::node::{ConditionNode, Connective};
use super::precedence::{connective, ends_clause, NOT_PRECEDENCE};
use super::simple::SimpleCondition;
use crate::lexer::{Span, Token, TokenKind, TokenList};
use crate::options::ParseOptions;
use crate::parser::ParseError;

/// An entry of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    /// `(` opening a group.
    Open(Span),
    /// Unary `NOT`.
    Not(Span),
    /// A binary connective.
    Binary(Connective, Span),
}

impl Pending {
    const fn precedence(self) -> u8 {
        match self {
            Self::Open(_) => 0,
            Self::Not(_) => NOT_PRECEDENCE,
            Self::Binary(op, _) => op.precedence(),
        }
    }
}

/// Builder state for one `WHERE`, `HAVING` or `ON` clause.
#[derive(Debug, Default)]
pub struct Condition {
    /// Completed sub-trees with their height.
    output: Vec<(ConditionNode, usize)>,
    operators: Vec<Pending>,
    leaf: Vec<Token>,
    between_pending: bool,
    brackets: usize,
    /// List depth the clause is parsed at.
    depth: usize,
    max_depth: usize,
}

impl Condition {
    /// Parses a condition clause starting at the cursor.
    ///
    /// The scan stops at the end of the list, at a statement delimiter, at an
    /// unmatched `)` or at a reserved keyword that cannot appear in a
    /// condition (e.g. `GROUP BY`). The cursor is left on that token so the
    /// caller can resume from it.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for structural problems: a connective without
    /// operands, sub-conditions not joined by a connective, unbalanced
    /// brackets, an empty clause, an incomplete simple condition or nesting
    /// beyond [`ParseOptions::max_depth`]. The height of the tree counts as
    /// nesting, so a long flat `OR` chain is bounded by the same limit.
    pub fn parse(list: &mut TokenList) -> Result<ConditionNode, ParseError> {
        let start = list.current_span();
        let mut state = Self {
            depth: list.depth(),
            max_depth: list.options().max_depth,
            ..Self::default()
        };
        state.scan(list)?;
        state.flush_leaf(list)?;
        let tree = state.finish(start)?;
        debug!(
            leaves = tree.leaf_count(),
            operators = tree.operator_count(),
            "Parsed condition"
        );
        Ok(tree)
    }

    /// Lexes and parses a bare clause such as `a = 1 AND b IS NULL`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the clause is malformed or if input is left
    /// over after it.
    pub fn parse_str(sql: &str) -> Result<ConditionNode, ParseError> {
        Self::parse_str_with_options(sql, ParseOptions::default())
    }

    /// Like [`Condition::parse_str`] with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the clause is malformed or if input is left
    /// over after it.
    pub fn parse_str_with_options(
        sql: &str,
        options: ParseOptions,
    ) -> Result<ConditionNode, ParseError> {
        let mut list = TokenList::from_sql_with_options(sql, options);
        let tree = Self::parse(&mut list)?;

        if list.current().is_some_and(|t| t.kind == TokenKind::Delimiter) {
            list.advance();
        }
        if let Some(token) = list.peek_significant() {
            return Err(ParseError::unexpected(
                "end of condition",
                token.text.clone(),
                token.span,
            ));
        }
        Ok(tree)
    }

    fn scan(&mut self, list: &mut TokenList) -> Result<(), ParseError> {
        while let Some(token) = list.current().cloned() {
            match token.kind {
                TokenKind::Comment => list.advance(),
                TokenKind::Whitespace => {
                    self.leaf.push(token);
                    list.advance();
                }
                TokenKind::Delimiter => break,
                _ => {
                    if !self.step(list, token)? {
                        break;
                    }
                }
            }
        }

        if let Some(token) = list.current() {
            debug!(stop = %token.value, "Condition scan stopped early");
        }
        Ok(())
    }

    /// Handles one significant token. Returns false if it ends the clause.
    fn step(&mut self, list: &mut TokenList, token: Token) -> Result<bool, ParseError> {
        let position = list.position();

        if token.is_keyword("NOT") && !self.leaf_started() {
            list.check_depth(self.brackets + self.pending_nots() + 1)?;
            self.operators.push(Pending::Not(token.span));
            list.advance();
            return Ok(true);
        }

        if let Some(op) = connective(&token) {
            if op == Connective::And && self.between_pending {
                self.between_pending = false;
                self.leaf.push(token);
                list.advance();
                return Ok(true);
            }
            self.flush_leaf(list)?;
            self.reduce_while(op.precedence())?;
            self.operators.push(Pending::Binary(op, token.span));
            list.advance();
            return Ok(true);
        }

        let followed_by_bracket = list.get(position + 1).is_some_and(|t| t.is_operator("("));
        if token.is_function() && followed_by_bracket {
            let close = list
                .matching_close(position + 1)
                .ok_or(ParseError::UnbalancedBracket { span: token.span })?;
            self.append(list, close);
            return Ok(true);
        }

        if token.is_operator("(") {
            if self.leaf_started() || self.opens_subquery(list) {
                let close = list
                    .matching_close(position)
                    .ok_or(ParseError::UnbalancedBracket { span: token.span })?;
                self.append(list, close);
            } else {
                self.brackets += 1;
                list.check_depth(self.brackets + self.pending_nots())?;
                self.operators.push(Pending::Open(token.span));
                list.advance();
            }
            return Ok(true);
        }

        if token.is_operator(")") {
            if self.brackets == 0 {
                return Ok(false);
            }
            self.flush_leaf(list)?;
            self.close_group(token.span)?;
            self.brackets -= 1;
            list.advance();
            return Ok(true);
        }

        if token.is_keyword("CASE") {
            let end = list
                .matching_end(position)
                .ok_or_else(|| ParseError::incomplete("CASE", token.span))?;
            self.append(list, end);
            return Ok(true);
        }

        if ends_clause(&token) && self.brackets == 0 {
            return Ok(false);
        }

        if token.is_keyword("BETWEEN") {
            self.between_pending = true;
        }
        self.leaf.push(token);
        list.advance();
        Ok(true)
    }

    /// Appends the tokens from the cursor through `last` to the leaf.
    fn append(&mut self, list: &mut TokenList, last: usize) {
        self.leaf.extend(list.slice(list.position(), last + 1));
        list.seek(last + 1);
    }

    /// `(` with a `SELECT` behind it is a scalar subquery, not a group.
    fn opens_subquery(&self, list: &TokenList) -> bool {
        list.significant_index(list.position() + 1)
            .and_then(|i| list.get(i))
            .is_some_and(|t| t.is_keyword("SELECT"))
    }

    fn leaf_started(&self) -> bool {
        self.leaf.iter().any(|t| !t.is_trivia())
    }

    fn pending_nots(&self) -> usize {
        self.operators
            .iter()
            .filter(|op| matches!(op, Pending::Not(_)))
            .count()
    }

    /// Classifies the buffered leaf and pushes it on the output stack.
    fn flush_leaf(&mut self, list: &TokenList) -> Result<(), ParseError> {
        self.between_pending = false;
        if !self.leaf_started() {
            self.leaf.clear();
            return Ok(());
        }

        let mut window = list.child(mem::take(&mut self.leaf))?;
        let condition = SimpleCondition::identify(&mut window)?;
        trace!(kind = condition.kind(), leaf = %condition, "Flushed leaf");
        self.output.push((ConditionNode::Leaf(condition), 1));
        Ok(())
    }

    /// Reduces operators while the stack top binds at least as tightly as `precedence`.
    fn reduce_while(&mut self, precedence: u8) -> Result<(), ParseError> {
        while let Some(&top) = self.operators.last() {
            if matches!(top, Pending::Open(_)) || top.precedence() < precedence {
                break;
            }
            self.reduce_top()?;
        }
        Ok(())
    }

    /// Pops one operator and combines it with its operands.
    fn reduce_top(&mut self) -> Result<(), ParseError> {
        let Some(top) = self.operators.pop() else {
            return Ok(());
        };

        let (node, height) = match top {
            Pending::Open(span) => return Err(ParseError::UnbalancedBracket { span }),
            Pending::Not(span) => {
                let (child, height) = self.output.pop().ok_or_else(|| ParseError::MissingOperand {
                    operator: "NOT".to_string(),
                    span,
                })?;
                (ConditionNode::not(child), height + 1)
            }
            Pending::Binary(op, span) => {
                let missing = || ParseError::MissingOperand {
                    operator: op.as_str().to_string(),
                    span,
                };
                let (right, right_height) = self.output.pop().ok_or_else(missing)?;
                let (left, left_height) = self.output.pop().ok_or_else(missing)?;
                (
                    ConditionNode::binary(op, left, right),
                    left_height.max(right_height) + 1,
                )
            }
        };

        // Every walk over the tree recurses once per level.
        if self.depth + height > self.max_depth {
            debug!(height, limit = self.max_depth, "Condition tree too deep");
            return Err(ParseError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        trace!(operator = node.tag(), height, "Reduced");
        self.output.push((node, height));
        Ok(())
    }

    /// Reduces everything back to the innermost `(` and drops it.
    fn close_group(&mut self, span: Span) -> Result<(), ParseError> {
        loop {
            match self.operators.last() {
                Some(Pending::Open(_)) => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(_) => self.reduce_top()?,
                None => return Err(ParseError::UnbalancedBracket { span }),
            }
        }
    }

    /// Reduces the remaining operators and returns the single tree left.
    fn finish(mut self, start: Span) -> Result<ConditionNode, ParseError> {
        while !self.operators.is_empty() {
            self.reduce_top()?;
        }

        let remaining = self.output.len();
        match self.output.pop() {
            None => Err(ParseError::EmptyCondition { span: start }),
            Some((tree, _)) if remaining == 1 => Ok(tree),
            Some(_) => Err(ParseError::MalformedNesting { remaining }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ComparisonOp;

    fn parse(sql: &str) -> ConditionNode {
        Condition::parse_str(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
    }

    fn leaf_text(node: Option<&ConditionNode>) -> String {
        node.and_then(ConditionNode::leaf)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_single_leaf() {
        let tree = parse("a = ?0");
        let Some(SimpleCondition::Comparison(c)) = tree.leaf() else {
            panic!("expected comparison leaf");
        };
        assert_eq!(c.lhs, "a");
        assert_eq!(c.op, ComparisonOp::Eq);
        assert_eq!(tree.operator_count(), 0);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let tree = parse("a = 1 AND b = 2 OR c = 3");
        assert_eq!(tree.tag(), "OR");
        assert_eq!(tree.left().unwrap().tag(), "AND");
        assert_eq!(leaf_text(tree.right()), "c = 3");
    }

    #[test]
    fn test_equal_precedence_reduces_left_to_right() {
        let tree = parse("a = 1 OR b = 2 XOR c = 3");
        assert_eq!(tree.tag(), "XOR");
        assert_eq!(tree.left().unwrap().tag(), "OR");
        assert_eq!(leaf_text(tree.right()), "c = 3");
    }

    #[test]
    fn test_not_is_unary_and_binds_tightest() {
        let tree = parse("NOT a = 1 AND b = 2");
        assert_eq!(tree.tag(), "AND");
        assert_eq!(tree.left().unwrap().tag(), "NOT");
        assert!(tree.left().unwrap().right().is_none());
    }

    #[test]
    fn test_not_before_group() {
        let tree = parse("NOT (a = 1 OR b = 2)");
        assert_eq!(tree.tag(), "NOT");
        assert_eq!(tree.left().unwrap().tag(), "OR");
    }

    #[test]
    fn test_between_and_is_not_a_connective() {
        let tree = parse("a BETWEEN 1 AND 10 AND b = 2");
        assert_eq!(tree.tag(), "AND");
        assert_eq!(tree.operator_count(), 1);
        assert_eq!(leaf_text(tree.left()), "a BETWEEN 1 AND 10");
    }

    #[test]
    fn test_function_arguments_stay_in_leaf() {
        let tree = parse("IF(a AND b, 1, 0) = 1 OR COUNT(x) > 2");
        assert_eq!(tree.tag(), "OR");
        assert_eq!(leaf_text(tree.left()), "IF(a AND b, 1, 0) = 1");
    }

    #[test]
    fn test_scan_stops_at_clause_keyword() {
        let mut list = TokenList::from_sql("a = 1 GROUP BY a");
        let tree = Condition::parse(&mut list).unwrap();
        assert!(tree.is_leaf());
        assert!(list.current().unwrap().is_keyword("GROUP BY"));
    }

    #[test]
    fn test_scan_stops_at_unmatched_bracket() {
        let mut list = TokenList::from_sql("a = 1) x");
        Condition::parse(&mut list).unwrap();
        assert!(list.current().unwrap().is_operator(")"));
    }

    #[test]
    fn test_scan_stops_at_delimiter() {
        let mut list = TokenList::from_sql("a = 1; SELECT 1");
        Condition::parse(&mut list).unwrap();
        assert_eq!(list.current().unwrap().kind, TokenKind::Delimiter);
    }

    #[test]
    fn test_comments_are_dropped() {
        let tree = parse("a /* first */ = 1 -- trailing\nAND b = 2");
        assert_eq!(tree.to_string(), "a = 1 AND b = 2");
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            Condition::parse_str("a = 1 AND"),
            Err(ParseError::MissingOperand { operator, .. }) if operator == "AND"
        ));
        assert!(matches!(
            Condition::parse_str("NOT"),
            Err(ParseError::MissingOperand { operator, .. }) if operator == "NOT"
        ));
    }

    #[test]
    fn test_unjoined_groups_are_malformed() {
        assert_eq!(
            Condition::parse_str("(a = 1) (b = 2)"),
            Err(ParseError::MalformedNesting { remaining: 2 })
        );
    }

    #[test]
    fn test_unclosed_group() {
        assert!(matches!(
            Condition::parse_str("(a = 1 AND b = 2"),
            Err(ParseError::UnbalancedBracket { span }) if span == Span::new(0, 1)
        ));
    }

    #[test]
    fn test_empty_condition() {
        assert!(matches!(
            Condition::parse_str("  "),
            Err(ParseError::EmptyCondition { .. })
        ));
    }

    #[test]
    fn test_bracket_depth_limit() {
        let sql = format!("{}a = 1{}", "(".repeat(5), ")".repeat(5));
        assert!(Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(8)).is_ok());
        assert_eq!(
            Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(4)),
            Err(ParseError::DepthLimitExceeded { limit: 4 })
        );
    }

    #[test]
    fn test_chain_height_limit() {
        let sql = "a = 1 OR b = 2 OR c = 3 OR d = 4";
        assert!(Condition::parse_str_with_options(sql, ParseOptions::with_max_depth(4)).is_ok());
        assert_eq!(
            Condition::parse_str_with_options(sql, ParseOptions::with_max_depth(3)),
            Err(ParseError::DepthLimitExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_chain_height_includes_list_depth() {
        let list = TokenList::from_sql_with_options("a = 1 AND b = 2", ParseOptions::with_max_depth(2));
        let mut child = list.child(list.slice(0, list.len())).unwrap();
        assert_eq!(
            Condition::parse(&mut child),
            Err(ParseError::DepthLimitExceeded { limit: 2 })
        );
    }
}
