//! Abstract Syntax Tree (AST) types for SQL statements.

mod statement;

pub use statement::{
    Assignment, DeleteStatement, JoinClause, JoinType, Limit, OrderBy, OrderDirection,
    SelectColumn, SelectStatement, Statement, TableRef, UpdateStatement,
};
