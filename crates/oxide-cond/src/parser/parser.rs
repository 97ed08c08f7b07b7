//! SQL Parser implementation.

use std::mem;

use tracing::debug;

use super::error::ParseError;
use crate::ast::{
    Assignment, DeleteStatement, JoinClause, JoinType, Limit, OrderBy, OrderDirection,
    SelectColumn, SelectStatement, Statement, TableRef, UpdateStatement,
};
use crate::condition::{render, take_unit, Condition, ConditionNode};
use crate::lexer::{Span, Token, TokenKind, TokenList};
use crate::options::ParseOptions;

/// Keywords that start the next clause of a statement.
const CLAUSE_KEYWORDS: &[&str] = &[
    "FROM",
    "WHERE",
    "GROUP BY",
    "HAVING",
    "ORDER BY",
    "LIMIT",
    "OFFSET",
    "SET",
    "ON",
    "USING",
    "UNION",
    "INTO",
    "FOR",
    "LOCK",
    "WINDOW",
    "PROCEDURE",
    "ON DUPLICATE KEY UPDATE",
];

/// SQL statement parser.
///
/// The statement grammar is deliberately small: it exists to find the
/// clauses that hold conditions and hands each of them to [`Condition::parse`].
pub struct Parser {
    list: TokenList,
}

impl Parser {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Creates a new parser with explicit options.
    #[must_use]
    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        Self {
            list: TokenList::from_sql_with_options(input, options),
        }
    }

    /// Parses a statement from the cursor of an existing token list.
    ///
    /// The list's cursor ends past the statement (and its `;`, if any).
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the tokens do not form a single statement.
    pub fn parse_list(list: &mut TokenList) -> Result<Statement, ParseError> {
        let mut parser = Self {
            list: mem::take(list),
        };
        let result = parser.parse_statement();
        *list = parser.list;
        result
    }

    /// Parses a single SQL statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = if self.check_keyword("SELECT") {
            Statement::Select(self.parse_select_statement()?)
        } else if self.check_keyword("UPDATE") {
            Statement::Update(self.parse_update_statement()?)
        } else if self.check_keyword("DELETE") {
            Statement::Delete(self.parse_delete_statement()?)
        } else {
            return Err(self.error_here("SELECT, UPDATE or DELETE"));
        };

        self.list.skip_trivia();
        if self.list.current().is_some_and(|t| t.kind == TokenKind::Delimiter) {
            self.list.advance();
        }
        if self.list.has_significant() {
            return Err(self.error_here("end of statement"));
        }

        debug!(conditions = statement.conditions().len(), "Parsed statement");
        Ok(statement)
    }

    /// Parses a SELECT statement.
    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword("SELECT")?;

        // DISTINCT or ALL
        let distinct = if self.eat_keyword("DISTINCT") {
            true
        } else {
            self.eat_keyword("ALL");
            false
        };

        let columns = self
            .parse_items("column")?
            .iter()
            .map(|item| {
                let (expr, alias) = split_alias(item);
                SelectColumn { expr, alias }
            })
            .collect();

        // FROM clause (optional for expressions like SELECT 1+1)
        let (from, joins) = if self.eat_keyword("FROM") {
            (self.parse_tables()?, self.parse_joins()?)
        } else {
            (vec![], vec![])
        };

        let where_clause = self.parse_condition_clause("WHERE")?;

        let group_by = if self.eat_keyword("GROUP BY") {
            self.parse_items("expression")?
                .iter()
                .map(|item| render(item))
                .collect()
        } else {
            vec![]
        };

        let having = self.parse_condition_clause("HAVING")?;
        let order_by = self.parse_order_by()?;
        let limit = self.parse_limit()?;

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            joins,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword("UPDATE")?;
        let tables = self.parse_tables()?;
        self.expect_keyword("SET")?;

        let assignments = self
            .parse_items("assignment")?
            .iter()
            .map(|item| parse_assignment(item))
            .collect::<Result<_, _>>()?;

        Ok(UpdateStatement {
            tables,
            assignments,
            where_clause: self.parse_condition_clause("WHERE")?,
            order_by: self.parse_order_by()?,
            limit: self.parse_limit()?,
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword("DELETE")?;
        self.expect_keyword("FROM")?;

        Ok(DeleteStatement {
            tables: self.parse_tables()?,
            where_clause: self.parse_condition_clause("WHERE")?,
            order_by: self.parse_order_by()?,
            limit: self.parse_limit()?,
        })
    }

    /// Parses `keyword condition` if the keyword is next.
    fn parse_condition_clause(&mut self, keyword: &str) -> Result<Option<ConditionNode>, ParseError> {
        if self.eat_keyword(keyword) {
            Ok(Some(Condition::parse(&mut self.list)?))
        } else {
            Ok(None)
        }
    }

    /// Parses comma-separated table references.
    fn parse_tables(&mut self) -> Result<Vec<TableRef>, ParseError> {
        Ok(self
            .parse_items("table name")?
            .iter()
            .map(|item| {
                let (name, alias) = split_alias(item);
                TableRef { name, alias }
            })
            .collect())
    }

    /// Parses the JOIN clauses following the FROM tables.
    fn parse_joins(&mut self) -> Result<Vec<JoinClause>, ParseError> {
        let mut joins = vec![];

        while let Some(join_type) = self.peek().and_then(join_keyword) {
            self.list.next_significant();

            let item = self.parse_item("table name")?;
            let (name, alias) = split_alias(&item);
            let table = TableRef { name, alias };

            let mut on = None;
            let mut using = vec![];
            if self.eat_keyword("ON") {
                on = Some(Condition::parse(&mut self.list)?);
            } else if self.eat_keyword("USING") {
                self.expect_operator("(")?;
                using = self
                    .parse_items("column")?
                    .iter()
                    .map(|item| render(item))
                    .collect();
                self.expect_operator(")")?;
            }

            joins.push(JoinClause {
                join_type,
                table,
                on,
                using,
            });
        }

        Ok(joins)
    }

    /// Parses an optional ORDER BY list.
    fn parse_order_by(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        if !self.eat_keyword("ORDER BY") {
            return Ok(vec![]);
        }

        Ok(self
            .parse_items("expression")?
            .iter()
            .map(|item| {
                let last = last_significant(item);
                let direction = match last.map(|i| item[i].value.as_str()) {
                    Some("ASC") => Some(OrderDirection::Asc),
                    Some("DESC") => Some(OrderDirection::Desc),
                    _ => None,
                };
                let expr = match (direction, last) {
                    (Some(_), Some(i)) => render(&item[..i]),
                    _ => render(item),
                };
                OrderBy { expr, direction }
            })
            .collect())
    }

    /// Parses an optional `LIMIT n [OFFSET m]` or `LIMIT m, n`.
    fn parse_limit(&mut self) -> Result<Option<Limit>, ParseError> {
        if !self.eat_keyword("LIMIT") {
            return Ok(None);
        }

        let first = render(&self.parse_item("row count")?);
        let limit = if self.eat_operator(",") {
            Limit {
                row_count: render(&self.parse_item("row count")?),
                offset: Some(first),
            }
        } else if self.eat_keyword("OFFSET") {
            Limit {
                row_count: first,
                offset: Some(render(&self.parse_item("offset")?)),
            }
        } else {
            Limit {
                row_count: first,
                offset: None,
            }
        };

        Ok(Some(limit))
    }

    /// Parses comma-separated items.
    fn parse_items(&mut self, expected: &str) -> Result<Vec<Vec<Token>>, ParseError> {
        let mut items = vec![self.parse_item(expected)?];
        while self.eat_operator(",") {
            items.push(self.parse_item(expected)?);
        }
        Ok(items)
    }

    /// Collects the tokens of one item, up to a top-level `,` or the next clause.
    fn parse_item(&mut self, expected: &str) -> Result<Vec<Token>, ParseError> {
        self.list.skip_trivia();
        let mut item = vec![];

        while let Some(token) = self.list.current() {
            if token.is_trivia() {
                item.push(token.clone());
                self.list.advance();
                continue;
            }
            if token.is_operator(",") || is_boundary(token) {
                break;
            }
            take_unit(&mut self.list, &mut item);
        }

        if last_significant(&item).is_none() {
            return Err(self.error_here(expected));
        }
        Ok(item)
    }

    // ===================================================================
    // Token helpers
    // ===================================================================

    fn peek(&self) -> Option<&Token> {
        self.list.peek_significant()
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.list.next_significant();
            true
        } else {
            false
        }
    }

    fn eat_operator(&mut self, operator: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_operator(operator)) {
            self.list.next_significant();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_here(keyword))
        }
    }

    fn expect_operator(&mut self, operator: &str) -> Result<(), ParseError> {
        if self.eat_operator(operator) {
            Ok(())
        } else {
            Err(self.error_here(operator))
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::unexpected(expected, token.text.clone(), token.span),
            None => ParseError::unexpected_eof(expected),
        }
    }
}

fn join_keyword(token: &Token) -> Option<JoinType> {
    if token.kind == TokenKind::Keyword {
        JoinType::from_keyword(&token.value)
    } else {
        None
    }
}

fn is_boundary(token: &Token) -> bool {
    match token.kind {
        TokenKind::Delimiter => true,
        TokenKind::Operator => token.is_operator(")"),
        TokenKind::Keyword => {
            CLAUSE_KEYWORDS.contains(&token.value.as_str()) || join_keyword(token).is_some()
        }
        _ => false,
    }
}

fn last_significant(tokens: &[Token]) -> Option<usize> {
    tokens.iter().rposition(|t| !t.is_trivia())
}

/// Splits a trailing `[AS] alias` off a column or table item.
fn split_alias(item: &[Token]) -> (String, Option<String>) {
    let significant: Vec<usize> = (0..item.len()).filter(|&i| !item[i].is_trivia()).collect();

    if let [.., before, last] = significant[..] {
        let alias = &item[last];
        let previous = &item[before];
        if alias.kind == TokenKind::Identifier && !alias.value.contains('.') {
            if previous.is_keyword("AS") {
                return (render(&item[..before]), Some(alias.text.clone()));
            }
            let ends_operand = matches!(
                previous.kind,
                TokenKind::Identifier | TokenKind::Literal | TokenKind::Hole
            ) || previous.is_operator(")")
                || previous.is_keyword("END");
            if ends_operand {
                return (render(&item[..last]), Some(alias.text.clone()));
            }
        }
    }

    (render(item), None)
}

/// Splits `column = value` at the first top-level `=`.
fn parse_assignment(item: &[Token]) -> Result<Assignment, ParseError> {
    let mut level = 0usize;
    for (i, token) in item.iter().enumerate() {
        if token.is_operator("(") {
            level += 1;
        } else if token.is_operator(")") {
            level = level.saturating_sub(1);
        } else if level == 0 && token.is_operator("=") {
            let column = render(&item[..i]);
            let value = render(&item[i + 1..]);
            if column.is_empty() || value.is_empty() {
                break;
            }
            return Ok(Assignment { column, value });
        }
    }

    let span = item
        .iter()
        .map(|t| t.span)
        .reduce(Span::merge)
        .unwrap_or_default();
    Err(ParseError::unexpected("column = value", render(item), span))
}
