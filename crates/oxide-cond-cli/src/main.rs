//! oxide-cond CLI
//!
//! Parses a SQL statement (or a bare condition) and prints its condition trees.

use std::io::{self, Read};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_cond::term::{condition_term, statement_term};
use oxide_cond::{Condition, ConditionNode, DEFAULT_MAX_DEPTH, ParseOptions, Statement};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Nested constructor terms.
    Term,
    /// Canonical SQL.
    Sql,
    /// JSON.
    Json,
    /// Rust debug representation.
    Debug,
}

/// Parse SQL condition clauses into boolean condition trees.
#[derive(Parser)]
#[command(name = "oxide-cond")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL to parse. Read from stdin if omitted.
    sql: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Term)]
    format: Format,

    /// Parse a bare condition (`a = 1 AND b IS NULL`) instead of a statement.
    #[arg(short, long)]
    condition: bool,

    /// Maximum nesting depth.
    #[arg(long, env = "OXIDE_COND_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

enum Parsed {
    Condition(ConditionNode),
    Statement(Statement),
}

impl Parsed {
    fn render(&self, format: Format) -> anyhow::Result<String> {
        let rendered = match (self, format) {
            (Self::Condition(tree), Format::Term) => condition_term(tree),
            (Self::Statement(statement), Format::Term) => statement_term(statement),
            (Self::Condition(tree), Format::Sql) => tree.to_string(),
            (Self::Statement(statement), Format::Sql) => statement.to_string(),
            (Self::Condition(tree), Format::Json) => serde_json::to_string_pretty(tree)?,
            (Self::Statement(statement), Format::Json) => serde_json::to_string_pretty(statement)?,
            (Self::Condition(tree), Format::Debug) => format!("{tree:#?}"),
            (Self::Statement(statement), Format::Debug) => format!("{statement:#?}"),
        };
        Ok(rendered)
    }
}

fn read_input(sql: Option<String>) -> anyhow::Result<String> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read SQL from stdin")?;
    Ok(input)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_input(cli.sql)?;
    let options = ParseOptions::with_max_depth(cli.max_depth);
    debug!(max_depth = cli.max_depth, bytes = input.len(), "Parsing input");

    let parsed = if cli.condition {
        Parsed::Condition(
            Condition::parse_str_with_options(&input, options)
                .with_context(|| format!("invalid condition: {}", input.trim()))?,
        )
    } else {
        let statement = oxide_cond::Parser::with_options(&input, options)
            .parse_statement()
            .with_context(|| format!("invalid statement: {}", input.trim()))?;
        info!(
            conditions = statement.conditions().len(),
            "Parsed statement"
        );
        Parsed::Statement(statement)
    };

    println!("{}", parsed.render(cli.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["oxide-cond", "SELECT 1"]).unwrap();
        assert_eq!(cli.sql.as_deref(), Some("SELECT 1"));
        assert_eq!(cli.format, Format::Term);
        assert!(!cli.condition);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "oxide-cond",
            "--format",
            "json",
            "--condition",
            "--max-depth",
            "8",
            "a = 1",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        assert!(cli.condition);
        assert_eq!(cli.max_depth, 8);
    }

    #[test]
    fn test_render_formats() {
        let parsed = Parsed::Condition(Condition::parse_str("a = 1 && b IS NULL").unwrap());
        assert_eq!(
            parsed.render(Format::Term).unwrap(),
            r#"and(condition(simpleComparison("a", "=", "1")), condition(isNull(false, "b")))"#
        );
        assert_eq!(parsed.render(Format::Sql).unwrap(), "a = 1 && b IS NULL");
        assert!(parsed.render(Format::Json).unwrap().contains("\"binary\""));
    }
}
