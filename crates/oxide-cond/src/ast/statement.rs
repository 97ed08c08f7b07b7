//! SQL statement AST types.
//!
//! Statements only give structure to the clauses that host conditions;
//! column expressions, table references and values are kept as normalized
//! source text.

use core::fmt;

use crate::condition::ConditionNode;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: String,
    /// The direction, if one was written.
    pub direction: Option<OrderDirection>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinType {
    /// JOIN or INNER JOIN.
    Inner,
    /// CROSS JOIN.
    Cross,
    /// LEFT [OUTER] JOIN.
    Left,
    /// RIGHT [OUTER] JOIN.
    Right,
    /// FULL [OUTER] JOIN.
    Full,
    /// NATURAL JOIN.
    Natural,
    /// STRAIGHT_JOIN.
    Straight,
}

impl JoinType {
    /// Maps a (compound) join keyword to its join type.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "JOIN" | "INNER JOIN" => Some(Self::Inner),
            "CROSS JOIN" => Some(Self::Cross),
            "LEFT JOIN" | "LEFT OUTER JOIN" => Some(Self::Left),
            "RIGHT JOIN" | "RIGHT OUTER JOIN" => Some(Self::Right),
            "FULL JOIN" | "FULL OUTER JOIN" => Some(Self::Full),
            "NATURAL JOIN" => Some(Self::Natural),
            "STRAIGHT_JOIN" => Some(Self::Straight),
            _ => None,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::Straight => "STRAIGHT_JOIN",
        }
    }
}

/// A table reference in a FROM, UPDATE or JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRef {
    /// Table name, or any other table expression as text.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates a table reference without alias.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableRef,
    /// The ON condition.
    pub on: Option<ConditionNode>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectColumn {
    /// The expression.
    pub expr: String,
    /// Column alias.
    pub alias: Option<String>,
}

/// A LIMIT clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Limit {
    /// Maximum number of rows.
    pub row_count: String,
    /// Rows to skip.
    pub offset: Option<String>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: String,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// Comma-separated FROM tables.
    pub from: Vec<TableRef>,
    /// JOIN clauses following the FROM tables.
    pub joins: Vec<JoinClause>,
    /// The WHERE clause.
    pub where_clause: Option<ConditionNode>,
    /// GROUP BY expressions.
    pub group_by: Vec<String>,
    /// HAVING clause.
    pub having: Option<ConditionNode>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateStatement {
    /// Updated tables.
    pub tables: Vec<TableRef>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_clause: Option<ConditionNode>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    /// Tables deleted from.
    pub tables: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<ConditionNode>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
}

impl Statement {
    /// The WHERE condition, if any.
    #[must_use]
    pub const fn where_clause(&self) -> Option<&ConditionNode> {
        match self {
            Self::Select(s) => s.where_clause.as_ref(),
            Self::Update(u) => u.where_clause.as_ref(),
            Self::Delete(d) => d.where_clause.as_ref(),
        }
    }

    /// Every condition of the statement: WHERE, HAVING and join ON clauses.
    #[must_use]
    pub fn conditions(&self) -> Vec<&ConditionNode> {
        match self {
            Self::Select(s) => s
                .joins
                .iter()
                .filter_map(|j| j.on.as_ref())
                .chain(s.where_clause.as_ref())
                .chain(s.having.as_ref())
                .collect(),
            Self::Update(u) => u.where_clause.iter().collect(),
            Self::Delete(d) => d.where_clause.iter().collect(),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_tail(
    f: &mut fmt::Formatter<'_>,
    where_clause: Option<&ConditionNode>,
    order_by: &[OrderBy],
    limit: Option<&Limit>,
) -> fmt::Result {
    if let Some(condition) = where_clause {
        write!(f, " WHERE {condition}")?;
    }
    if !order_by.is_empty() {
        f.write_str(" ORDER BY ")?;
        write_list(f, order_by)?;
    }
    if let Some(limit) = limit {
        write!(f, " {limit}")?;
    }
    Ok(())
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.join_type.as_str(), self.table)?;
        if let Some(on) = &self.on {
            write!(f, " ON {on}")?;
        } else if !self.using.is_empty() {
            write!(f, " USING ({})", self.using.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.row_count)?;
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write_list(f, &self.columns)?;
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            write_list(f, &self.from)?;
        }
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", self.group_by.join(", "))?;
        }
        if let Some(condition) = &self.having {
            write!(f, " HAVING {condition}")?;
        }
        write_tail(f, None, &self.order_by, self.limit.as_ref())
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UPDATE ")?;
        write_list(f, &self.tables)?;
        f.write_str(" SET ")?;
        write_list(f, &self.assignments)?;
        write_tail(
            f,
            self.where_clause.as_ref(),
            &self.order_by,
            self.limit.as_ref(),
        )
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DELETE FROM ")?;
        write_list(f, &self.tables)?;
        write_tail(
            f,
            self.where_clause.as_ref(),
            &self.order_by,
            self.limit.as_ref(),
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Update(u) => write!(f, "{u}"),
            Self::Delete(d) => write!(f, "{d}"),
        }
    }
}
