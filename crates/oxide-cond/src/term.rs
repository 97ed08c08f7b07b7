//! Term output.
//!
//! Renders statements and condition trees as nested constructor terms, e.g.
//! `and(condition(simpleComparison("a", "=", "1")), condition(isNull(true, "b")))`.
//! Every node tag and every leaf variant maps to exactly one constructor.

use crate::ast::{JoinClause, Limit, OrderBy, SelectStatement, Statement, TableRef};
use crate::condition::{
    ComparisonCondition, ComparisonRhs, ConditionNode, Connective, InValues, SimpleCondition,
};

/// Escapes a string for use inside a term string literal.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '"' | '\'' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn quote(s: &str) -> String {
    format!("\"{}\"", escape(s))
}

fn quote_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(quote).collect();
    format!("[{}]", quoted.join(", "))
}

/// Renders a condition tree.
#[must_use]
pub fn condition_term(node: &ConditionNode) -> String {
    match node {
        ConditionNode::Leaf(condition) => format!("condition({})", simple_term(condition)),
        ConditionNode::Not(child) => format!("not({})", condition_term(child)),
        ConditionNode::Binary { op, left, right } => {
            let name = match op {
                Connective::And | Connective::AmpAmp => "and",
                Connective::Or | Connective::PipePipe => "or",
                Connective::Xor => "xor",
            };
            format!("{name}({}, {})", condition_term(left), condition_term(right))
        }
    }
}

/// Renders a single leaf condition.
#[must_use]
pub fn simple_term(condition: &SimpleCondition) -> String {
    match condition {
        SimpleCondition::Comparison(c) => comparison_term(c),
        SimpleCondition::Between(c) => format!(
            "between({}, {}, {}, {})",
            c.not,
            quote(&c.expr),
            quote(&c.lower_bound),
            quote(&c.upper_bound)
        ),
        SimpleCondition::Null(c) => format!("isNull({}, {})", c.not, quote(&c.expr)),
        SimpleCondition::In(c) => match &c.values {
            InValues::List(values) => format!(
                "inValues({}, {}, {})",
                c.not,
                quote(&c.expr),
                quote_list(values.iter().map(String::as_str))
            ),
            InValues::Subquery(statement) => format!(
                "inSubquery({}, {}, {})",
                c.not,
                quote(&c.expr),
                statement_term(statement)
            ),
        },
        SimpleCondition::Like(c) => format!(
            "like({}, {}, {})",
            c.not,
            quote(&c.expr),
            quote(&c.pattern)
        ),
        SimpleCondition::NotYetImplemented(c) => format!("unknown({})", quote(&c.raw)),
    }
}

fn comparison_term(c: &ComparisonCondition) -> String {
    let term = match &c.rhs {
        ComparisonRhs::Value(value) => format!(
            "simpleComparison({}, {}, {})",
            quote(&c.lhs),
            quote(c.op.as_str()),
            quote(value)
        ),
        ComparisonRhs::Chained(next) => format!(
            "compoundComparison({}, {}, {})",
            quote(&c.lhs),
            quote(c.op.as_str()),
            comparison_term(next)
        ),
    };
    if c.not {
        format!("not({term})")
    } else {
        term
    }
}

fn where_term(keyword: &str, node: Option<&ConditionNode>) -> String {
    node.map_or_else(
        || format!("no{}()", capitalize(keyword)),
        |n| format!("{keyword}({})", condition_term(n)),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

fn tables_term(tables: &[TableRef]) -> String {
    let names: Vec<String> = tables.iter().map(ToString::to_string).collect();
    quote_list(names.iter().map(String::as_str))
}

fn order_by_term(order_by: &[OrderBy]) -> String {
    if order_by.is_empty() {
        return "noOrderBy()".to_string();
    }
    let items: Vec<String> = order_by
        .iter()
        .map(|o| {
            let direction = o.direction.map_or("", |d| d.as_str());
            format!("<{}, {}>", quote(&o.expr), quote(direction))
        })
        .collect();
    format!("orderBy([{}])", items.join(", "))
}

fn limit_term(limit: Option<&Limit>) -> String {
    match limit {
        None => "noLimit()".to_string(),
        Some(Limit {
            row_count,
            offset: None,
        }) => format!("limit({})", quote(row_count)),
        Some(Limit {
            row_count,
            offset: Some(offset),
        }) => format!("limitWithOffset({}, {})", quote(row_count), quote(offset)),
    }
}

fn join_term(join: &JoinClause) -> String {
    let kind = quote(join.join_type.as_str());
    let table = quote(&join.table.to_string());
    match (&join.on, join.using.is_empty()) {
        (Some(on), _) => format!("joinOn({kind}, {table}, {})", condition_term(on)),
        (None, false) => format!(
            "joinUsing({kind}, {table}, {})",
            quote_list(join.using.iter().map(String::as_str))
        ),
        (None, true) => format!("simpleJoin({kind}, {table})"),
    }
}

fn select_term(select: &SelectStatement) -> String {
    let columns: Vec<String> = select.columns.iter().map(ToString::to_string).collect();
    let group_by = if select.group_by.is_empty() {
        "noGroupBy()".to_string()
    } else {
        format!(
            "groupBy({})",
            quote_list(select.group_by.iter().map(String::as_str))
        )
    };
    let joins: Vec<String> = select.joins.iter().map(join_term).collect();

    format!(
        "selectQuery({}, {}, {}, {}, {}, {}, {}, [{}])",
        quote_list(columns.iter().map(String::as_str)),
        tables_term(&select.from),
        where_term("where", select.where_clause.as_ref()),
        group_by,
        where_term("having", select.having.as_ref()),
        order_by_term(&select.order_by),
        limit_term(select.limit.as_ref()),
        joins.join(", ")
    )
}

/// Renders a statement.
#[must_use]
pub fn statement_term(statement: &Statement) -> String {
    match statement {
        Statement::Select(select) => select_term(select),
        Statement::Update(update) => {
            let assignments: Vec<String> = update
                .assignments
                .iter()
                .map(|a| format!("<{}, {}>", quote(&a.column), quote(&a.value)))
                .collect();
            format!(
                "updateQuery({}, [{}], {}, {}, {})",
                tables_term(&update.tables),
                assignments.join(", "),
                where_term("where", update.where_clause.as_ref()),
                order_by_term(&update.order_by),
                limit_term(update.limit.as_ref())
            )
        }
        Statement::Delete(delete) => format!(
            "deleteQuery({}, {}, {}, {})",
            tables_term(&delete.tables),
            where_term("where", delete.where_clause.as_ref()),
            order_by_term(&delete.order_by),
            limit_term(delete.limit.as_ref())
        ),
    }
}
