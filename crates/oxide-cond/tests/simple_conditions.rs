//! Tests for leaf classification and the per-grammar continuations.

mod common;
use common::*;

use oxide_cond::condition::{ComparisonOp, ComparisonRhs, InValues, SimpleCondition};
use oxide_cond::{Statement, TokenList};

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn comparison_with_hole() {
    let SimpleCondition::Comparison(c) = leaf("a = ?0") else {
        panic!("expected comparison");
    };
    assert_eq!(c.lhs, "a");
    assert_eq!(c.op, ComparisonOp::Eq);
    assert_eq!(c.rhs, ComparisonRhs::Value("?0".to_string()));
    assert!(!c.not);
}

#[test]
fn every_comparison_operator() {
    for (sql, op) in [
        ("a = 1", ComparisonOp::Eq),
        ("a != 1", ComparisonOp::BangEq),
        ("a ^= 1", ComparisonOp::CaretEq),
        ("a <> 1", ComparisonOp::LtGt),
        ("a > 1", ComparisonOp::Gt),
        ("a < 1", ComparisonOp::Lt),
        ("a >= 1", ComparisonOp::GtEq),
        ("a <= 1", ComparisonOp::LtEq),
    ] {
        assert!(
            matches!(leaf(sql), SimpleCondition::Comparison(c) if c.op == op),
            "wrong operator for {sql}"
        );
    }
}

#[test]
fn chained_comparison_nests_to_the_right() {
    let SimpleCondition::Comparison(c) = leaf("a < ?0 < ?1") else {
        panic!("expected comparison");
    };
    assert_eq!(c.lhs, "a");
    assert_eq!(c.op, ComparisonOp::Lt);
    assert_eq!(c.chain_len(), 2);
    let ComparisonRhs::Chained(next) = &c.rhs else {
        panic!("expected a chained right-hand side");
    };
    assert_eq!(next.lhs, "?0");
    assert_eq!(next.rhs, ComparisonRhs::Value("?1".to_string()));
}

#[test]
fn expression_operands() {
    let SimpleCondition::Comparison(c) = leaf("price * qty + 1 >= LEAST(a, b) - 2") else {
        panic!("expected comparison");
    };
    assert_eq!(c.lhs, "price * qty + 1");
    assert_eq!(c.rhs, ComparisonRhs::Value("LEAST(a, b) - 2".to_string()));
}

#[test]
fn qualified_and_quoted_names() {
    let SimpleCondition::Comparison(c) = leaf("`u`.`id` = t.user_id") else {
        panic!("expected comparison");
    };
    assert_eq!(c.lhs, "`u`.`id`");
    assert_eq!(c.rhs, ComparisonRhs::Value("t.user_id".to_string()));
}

#[test]
fn named_holes_and_variables() {
    assert!(matches!(
        leaf("created_at > :since"),
        SimpleCondition::Comparison(c) if c.rhs == ComparisonRhs::Value(":since".to_string())
    ));
    assert!(matches!(
        leaf("@limit <= 10"),
        SimpleCondition::Comparison(c) if c.lhs == "@limit"
    ));
}

// =============================================================================
// BETWEEN
// =============================================================================

#[test]
fn between_bounds() {
    let SimpleCondition::Between(b) = leaf("a BETWEEN 1 AND 10") else {
        panic!("expected between");
    };
    assert_eq!(b.expr, "a");
    assert_eq!(b.lower_bound, "1");
    assert_eq!(b.upper_bound, "10");
    assert!(!b.not);
}

#[test]
fn between_expression_bounds() {
    let SimpleCondition::Between(b) = leaf("d NOT BETWEEN DATE_SUB(NOW(), INTERVAL 1 DAY) AND NOW()")
    else {
        panic!("expected between");
    };
    assert!(b.not);
    assert_eq!(b.lower_bound, "DATE_SUB(NOW(), INTERVAL 1 DAY)");
    assert_eq!(b.upper_bound, "NOW()");
}

// =============================================================================
// IS NULL
// =============================================================================

#[test]
fn null_tests() {
    assert!(matches!(leaf("a IS NULL"), SimpleCondition::Null(n) if !n.not && n.expr == "a"));
    assert!(matches!(leaf("a IS NOT NULL"), SimpleCondition::Null(n) if n.not));
    assert!(matches!(
        leaf("a IS NOT /* really */ NULL"),
        SimpleCondition::Null(n) if n.not
    ));
}

#[test]
fn other_is_tests_are_kept_verbatim() {
    assert!(matches!(
        leaf("flag IS TRUE"),
        SimpleCondition::NotYetImplemented(c) if c.raw == "flag IS TRUE"
    ));
    assert!(matches!(
        leaf("flag IS NOT UNKNOWN"),
        SimpleCondition::NotYetImplemented(_)
    ));
}

// =============================================================================
// IN
// =============================================================================

#[test]
fn in_value_list() {
    let SimpleCondition::In(c) = leaf("col IN (1,2,3)") else {
        panic!("expected in");
    };
    assert_eq!(c.expr, "col");
    assert!(!c.not);
    assert_eq!(
        c.values,
        InValues::List(vec!["1".to_string(), "2".to_string(), "3".to_string()])
    );
}

#[test]
fn not_in_with_nested_brackets() {
    let SimpleCondition::In(c) = leaf("col NOT IN (CONCAT('a', 'b'), (1 + 2), ?)") else {
        panic!("expected in");
    };
    assert!(c.not);
    assert_eq!(
        c.values,
        InValues::List(vec![
            "CONCAT('a', 'b')".to_string(),
            "(1 + 2)".to_string(),
            "?".to_string()
        ])
    );
}

#[test]
fn in_subquery() {
    let SimpleCondition::In(c) = leaf("id IN (SELECT user_id FROM orders WHERE total > 100)")
    else {
        panic!("expected in");
    };
    let InValues::Subquery(statement) = &c.values else {
        panic!("expected a subquery");
    };
    let Statement::Select(select) = statement.as_ref() else {
        panic!("expected SELECT");
    };
    assert_eq!(select.columns[0].expr, "user_id");
    assert_eq!(
        select.where_clause.as_ref().map(ToString::to_string),
        Some("total > 100".to_string())
    );
}

#[test]
fn in_values_that_start_with_select_like_words() {
    // `selected` is an identifier, not the SELECT keyword.
    assert!(matches!(
        leaf("x IN (selected, other)"),
        SimpleCondition::In(c) if matches!(&c.values, InValues::List(v) if v.len() == 2)
    ));
}

// =============================================================================
// LIKE
// =============================================================================

#[test]
fn like_pattern() {
    let SimpleCondition::Like(l) = leaf("name LIKE CONCAT('%', ?, '%')") else {
        panic!("expected like");
    };
    assert_eq!(l.expr, "name");
    assert_eq!(l.pattern, "CONCAT('%', ?, '%')");
}

// =============================================================================
// Catch-all
// =============================================================================

#[test]
fn unknown_grammars_fall_back() {
    for sql in [
        "a REGEXP '^[a-z]+$'",
        "a SOUNDS LIKE b",
        "MATCH (title) AGAINST ('rust')",
        "a <=> b",
        "EXISTS (SELECT 1)",
        "active",
    ] {
        assert!(
            matches!(leaf(sql), SimpleCondition::NotYetImplemented(c) if c.raw == sql),
            "expected catch-all for {sql}"
        );
    }
}

#[test]
fn catch_all_keeps_spacing_but_not_comments() {
    let tree = cond("a  REGEXP /* pattern */ 'x'");
    assert_eq!(tree.to_string(), "a  REGEXP  'x'");
}

// =============================================================================
// Direct classification
// =============================================================================

#[test]
fn identify_consumes_the_window() {
    let mut list = TokenList::from_sql("  NOT a = 1 ");
    let condition = SimpleCondition::identify(&mut list).unwrap();
    assert!(list.is_at_end());
    assert!(matches!(condition, SimpleCondition::Comparison(ref c) if c.not));
    assert_eq!(condition.to_string(), "NOT a = 1");
}

#[test]
fn identify_toggles_not() {
    let mut list = TokenList::from_sql("NOT a NOT LIKE 'x'");
    assert!(matches!(
        SimpleCondition::identify(&mut list),
        Ok(SimpleCondition::Like(l)) if !l.not
    ));

    let mut list = TokenList::from_sql("NOT a IS NOT NULL");
    assert!(matches!(
        SimpleCondition::identify(&mut list),
        Ok(SimpleCondition::Null(n)) if !n.not
    ));

    let mut list = TokenList::from_sql("NOT a NOT IN (1)");
    assert!(matches!(
        SimpleCondition::identify(&mut list),
        Ok(SimpleCondition::In(c)) if !c.not
    ));
}
