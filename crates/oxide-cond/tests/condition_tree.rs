//! Tests for the shape of condition trees: precedence, grouping, `NOT`
//! placement and where a clause scan stops.

mod common;
use common::*;

use oxide_cond::condition::{Connective, SimpleCondition};
use oxide_cond::{Condition, ConditionNode, ParseOptions, TokenList};

fn leaf_text(node: Option<&ConditionNode>) -> String {
    node.and_then(ConditionNode::leaf)
        .map(ToString::to_string)
        .unwrap_or_default()
}

// =============================================================================
// Leaves and internal nodes
// =============================================================================

#[test]
fn single_comparison_is_one_leaf() {
    let tree = cond("a = ?0");
    assert!(tree.is_leaf());
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.operator_count(), 0);
    assert_eq!(tree.tag(), "LEAF");
}

#[test]
fn leaves_match_simple_conditions_and_nodes_match_connectives() {
    let tree = cond("a = 1 AND b BETWEEN 1 AND 2 OR NOT c IS NULL XOR d LIKE 'x%'");
    assert_eq!(tree.leaf_count(), 4);
    // AND, OR, NOT, XOR; the BETWEEN separator is not a connective.
    assert_eq!(tree.operator_count(), 4);

    let kinds: Vec<_> = tree.leaves().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec!["comparison", "between", "null", "like"]);
}

#[test]
fn between_alone_has_no_internal_node() {
    let tree = cond("a BETWEEN 1 AND 10");
    assert!(matches!(tree, ConditionNode::Leaf(SimpleCondition::Between(_))));
    assert_eq!(tree.operator_count(), 0);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn and_binds_tighter_than_or() {
    let tree = cond("a = 1 AND b = 2 OR c = 3");
    assert_eq!(tree.tag(), "OR");
    assert_eq!(tree.left().map(ConditionNode::tag), Some("AND"));
    assert_eq!(leaf_text(tree.right()), "c = 3");

    let tree = cond("a = 1 OR b = 2 AND c = 3");
    assert_eq!(tree.tag(), "OR");
    assert_eq!(leaf_text(tree.left()), "a = 1");
    assert_eq!(tree.right().map(ConditionNode::tag), Some("AND"));
}

#[test]
fn or_and_xor_reduce_left_to_right() {
    let tree = cond("a = 1 OR b = 2 XOR c = 3");
    assert_eq!(tree.tag(), "XOR");
    assert_eq!(tree.left().map(ConditionNode::tag), Some("OR"));

    let tree = cond("a = 1 XOR b = 2 OR c = 3");
    assert_eq!(tree.tag(), "OR");
    assert_eq!(tree.left().map(ConditionNode::tag), Some("XOR"));
}

#[test]
fn long_and_chain_is_left_leaning() {
    let tree = cond("a = 1 AND b = 2 AND c = 3 AND d = 4");
    assert_eq!(tree.depth(), 4);
    assert_eq!(leaf_text(tree.right()), "d = 4");
    let order: Vec<_> = tree.leaves().iter().map(ToString::to_string).collect();
    assert_eq!(order, vec!["a = 1", "b = 2", "c = 3", "d = 4"]);
}

#[test]
fn symbolic_connectives_keep_their_spelling() {
    let tree = cond("a = 1 && b = 2 || c = 3");
    assert!(matches!(
        &tree,
        ConditionNode::Binary { op: Connective::PipePipe, left, .. }
            if matches!(**left, ConditionNode::Binary { op: Connective::AmpAmp, .. })
    ));
    assert_eq!(tree.to_string(), "(a = 1 && b = 2) || c = 3");
}

// =============================================================================
// Grouping
// =============================================================================

#[test]
fn brackets_override_precedence() {
    let tree = cond("(a = 1 OR b = 2) AND c = 3");
    assert_eq!(tree.tag(), "AND");
    assert_eq!(tree.left().map(ConditionNode::tag), Some("OR"));
    assert_eq!(leaf_text(tree.right()), "c = 3");
}

#[test]
fn redundant_brackets_disappear() {
    let tree = cond("((a = 1))");
    assert!(tree.is_leaf());
    assert_eq!(tree.to_string(), "a = 1");
}

#[test]
fn nested_groups() {
    let tree = cond("a = 1 AND (b = 2 OR (c = 3 AND d = 4))");
    assert_eq!(tree.tag(), "AND");
    let right = tree.right().unwrap();
    assert_eq!(right.tag(), "OR");
    assert_eq!(right.right().map(ConditionNode::tag), Some("AND"));
    assert_eq!(tree.depth(), 4);
}

// =============================================================================
// NOT placement
// =============================================================================

#[test]
fn not_binds_tighter_than_and() {
    let tree = cond("NOT a = 1 AND b = 2");
    assert_eq!(tree.tag(), "AND");
    assert_eq!(tree.left().map(ConditionNode::tag), Some("NOT"));
}

#[test]
fn not_before_group_negates_the_group() {
    let tree = cond("a = 1 AND NOT (b = 2 OR c = 3)");
    let negated = tree.right().unwrap();
    assert_eq!(negated.tag(), "NOT");
    assert_eq!(negated.left().map(ConditionNode::tag), Some("OR"));
}

#[test]
fn double_not_nests() {
    let tree = cond("NOT NOT a = 1");
    assert!(matches!(&tree, ConditionNode::Not(inner) if matches!(**inner, ConditionNode::Not(_))));
}

#[test]
fn not_inside_a_leaf_negates_the_leaf() {
    let tree = cond("a NOT BETWEEN 1 AND 2 AND b NOT LIKE 'x'");
    assert_eq!(tree.tag(), "AND");
    assert!(matches!(
        tree.left().and_then(ConditionNode::leaf),
        Some(SimpleCondition::Between(b)) if b.not
    ));
    assert!(matches!(
        tree.right().and_then(ConditionNode::leaf),
        Some(SimpleCondition::Like(l)) if l.not
    ));
}

// =============================================================================
// Operands that contain connectives
// =============================================================================

#[test]
fn between_and_then_connective_and() {
    let tree = cond("a BETWEEN 1 AND 10 AND b = 2");
    assert_eq!(tree.tag(), "AND");
    assert_eq!(leaf_text(tree.left()), "a BETWEEN 1 AND 10");
    assert_eq!(leaf_text(tree.right()), "b = 2");
}

#[test]
fn function_arguments_stay_in_one_leaf() {
    let tree = cond("IF(a AND b, 1, 0) = 1 OR COALESCE(x OR y, 0) > 2");
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(leaf_text(tree.left()), "IF(a AND b, 1, 0) = 1");
    assert_eq!(leaf_text(tree.right()), "COALESCE(x OR y, 0) > 2");
}

#[test]
fn case_expression_is_captured_whole() {
    let tree = cond("CASE WHEN a = 1 OR b = 2 THEN 1 ELSE 0 END = 1 OR c = 3");
    assert_eq!(tree.tag(), "OR");
    assert!(matches!(
        tree.left().and_then(ConditionNode::leaf),
        Some(SimpleCondition::Comparison(c)) if c.lhs == "CASE WHEN a = 1 OR b = 2 THEN 1 ELSE 0 END"
    ));
}

#[test]
fn scalar_subquery_operand() {
    let tree = cond("a = (SELECT MAX(id) FROM t WHERE x = 1 OR y = 2) AND b = 1");
    assert_eq!(tree.tag(), "AND");
    assert!(matches!(
        tree.left().and_then(ConditionNode::leaf),
        Some(SimpleCondition::Comparison(c))
            if c.to_string() == "a = (SELECT MAX(id) FROM t WHERE x = 1 OR y = 2)"
    ));
}

#[test]
fn unrecognized_leaves_are_kept_verbatim() {
    let tree = cond("EXISTS (SELECT 1 FROM t) AND a REGEXP '^x'");
    assert_eq!(tree.tag(), "AND");
    assert!(matches!(
        tree.left().and_then(ConditionNode::leaf),
        Some(SimpleCondition::NotYetImplemented(c)) if c.raw == "EXISTS (SELECT 1 FROM t)"
    ));
    assert!(matches!(
        tree.right().and_then(ConditionNode::leaf),
        Some(SimpleCondition::NotYetImplemented(c)) if c.raw == "a REGEXP '^x'"
    ));
}

// =============================================================================
// Where the scan stops
// =============================================================================

fn stop_token(sql: &str) -> Option<String> {
    let mut list = TokenList::from_sql(sql);
    Condition::parse(&mut list).unwrap();
    list.current().map(|t| t.value.clone())
}

#[test]
fn scan_stops_at_clause_keywords() {
    assert_eq!(stop_token("a = 1 GROUP BY a"), Some("GROUP BY".to_string()));
    assert_eq!(stop_token("a = 1 ORDER BY a"), Some("ORDER BY".to_string()));
    assert_eq!(stop_token("a = 1 LIMIT 5"), Some("LIMIT".to_string()));
    assert_eq!(stop_token("a = b LEFT JOIN u"), Some("LEFT JOIN".to_string()));
}

#[test]
fn scan_stops_at_delimiter_and_unmatched_bracket() {
    assert_eq!(stop_token("a = 1; SELECT 1"), Some(";".to_string()));
    assert_eq!(stop_token("a = 1) AND b = 2"), Some(")".to_string()));
}

#[test]
fn scan_consumes_to_the_end() {
    assert_eq!(stop_token("a = 1 AND b = 2"), None);
}

#[test]
fn clause_keywords_inside_brackets_do_not_stop_the_scan() {
    let tree = cond("a IN (SELECT b FROM t ORDER BY b LIMIT 1) AND c = 2");
    assert_eq!(tree.leaf_count(), 2);
}

// =============================================================================
// Depth limit
// =============================================================================

#[test]
fn deep_brackets_hit_the_default_limit() {
    let sql = format!("{}a = 1{}", "(".repeat(300), ")".repeat(300));
    assert!(matches!(
        cond_err(&sql),
        oxide_cond::ParseError::DepthLimitExceeded { limit: 256 }
    ));
}

#[test]
fn stacked_nots_count_towards_the_limit() {
    let sql = format!("{}a = 1", "NOT ".repeat(10));
    let options = ParseOptions::with_max_depth(5);
    assert!(matches!(
        Condition::parse_str_with_options(&sql, options),
        Err(oxide_cond::ParseError::DepthLimitExceeded { limit: 5 })
    ));
    assert!(Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(16)).is_ok());
}

#[test]
fn long_flat_chains_hit_the_limit() {
    let sql = ["a = 1"; 200_000].join(" OR ");
    assert!(matches!(
        cond_err(&sql),
        oxide_cond::ParseError::DepthLimitExceeded { limit: 256 }
    ));
    assert!(matches!(
        Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(8)),
        Err(oxide_cond::ParseError::DepthLimitExceeded { limit: 8 })
    ));
}

#[test]
fn flat_chain_height_counts_towards_the_limit() {
    let sql = ["a = 1"; 9].join(" AND ");
    assert!(Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(9)).is_ok());
    assert!(matches!(
        Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(8)),
        Err(oxide_cond::ParseError::DepthLimitExceeded { limit: 8 })
    ));
}

#[test]
fn flat_chains_within_the_limit_can_be_walked() {
    let sql = ["a = 1"; 500].join(" OR ");
    let tree = Condition::parse_str_with_options(&sql, ParseOptions::with_max_depth(512)).unwrap();
    assert_eq!(tree.leaf_count(), 500);
    assert_eq!(tree.operator_count(), 499);
    assert_eq!(tree.depth(), 500);

    let rendered = tree.to_string();
    assert!(rendered.starts_with(&"(".repeat(498)));
    assert!(rendered.ends_with(") OR a = 1"));
    assert!(oxide_cond::term::condition_term(&tree).starts_with("or(or("));
    assert_eq!(tree.clone(), tree);
    drop(tree);
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn round_trip_conditions() {
    round_trip_cond("a = ?0");
    round_trip_cond("a < ?0 < ?1");
    round_trip_cond("a = 1 AND b = 2 OR c = 3");
    round_trip_cond("(a = 1 OR b = 2) AND c = 3");
    round_trip_cond("a = 1 OR (b = 2 XOR c = 3)");
    round_trip_cond("NOT (a = 1 AND b IS NOT NULL)");
    round_trip_cond("NOT NOT a = 1");
    round_trip_cond("x NOT IN (1, 2, 3) && y NOT BETWEEN 1 AND 2");
    round_trip_cond("name LIKE 'a%' ESCAPE '!' || name IS NULL");
    round_trip_cond("a IN (SELECT b FROM t WHERE c = 1) AND EXISTS (SELECT 1)");
    round_trip_cond("a  =  /* comment */ 1\n AND\tb = 2");
}

#[test]
fn catch_all_ending_in_minus_keeps_the_next_connective() {
    let tree = cond("a --&& b = 1");
    assert_eq!(tree.leaf_count(), 2);
    assert!(matches!(
        tree.left().and_then(ConditionNode::leaf),
        Some(SimpleCondition::NotYetImplemented(c)) if c.raw == "a --"
    ));
    assert_eq!(tree.to_string(), "(a --) && b = 1");
    round_trip_cond("a --&& b = 1");
    round_trip_cond("NOT x --|| y = 2");
}
