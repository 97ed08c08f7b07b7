#![allow(dead_code)]

use oxide_cond::ast::{DeleteStatement, SelectStatement, Statement, UpdateStatement};
use oxide_cond::condition::SimpleCondition;
use oxide_cond::{Condition, ConditionNode, ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn cond(sql: &str) -> ConditionNode {
    Condition::parse_str(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn cond_err(sql: &str) -> ParseError {
    Condition::parse_str(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// Parses a clause that must be a single leaf.
pub fn leaf(sql: &str) -> SimpleCondition {
    match cond(sql) {
        ConditionNode::Leaf(condition) => condition,
        other => panic!("Expected a leaf for: {sql}, got {other:?}"),
    }
}

/// Verifies that rendering a condition and parsing it again yields an
/// equal tree, and that the rendering is a fixed point.
pub fn round_trip_cond(sql: &str) {
    let tree1 = cond(sql);
    let rendered1 = tree1.to_string();
    let tree2 = cond(&rendered1);
    let rendered2 = tree2.to_string();
    assert_eq!(
        tree1, tree2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
