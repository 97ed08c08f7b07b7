//! Token types for the SQL lexer.

use super::Span;

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// A run of whitespace.
    Whitespace,
    /// `-- ...`, `# ...` or `/* ... */`.
    Comment,
    /// Statement delimiter (`;`).
    Delimiter,
    /// SQL keyword, possibly compound (e.g. `NOT IN`).
    Keyword,
    /// Operators and punctuation, brackets included.
    Operator,
    /// String or numeric literal.
    Literal,
    /// Identifier, possibly qualified (`db.table.column`), or a variable.
    Identifier,
    /// Query hole or parameter placeholder (`?`, `?0`, `:name`).
    Hole,
    /// Anything the lexer could not make sense of.
    Unknown,
}

/// Keyword flag bits carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// The keyword is reserved and cannot be used as a bare identifier.
    pub const RESERVED: Self = Self(1);
    /// The keyword names a SQL function.
    pub const FUNCTION: Self = Self(1 << 1);

    /// Returns the union of two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

const R: TokenFlags = TokenFlags::RESERVED;
const F: TokenFlags = TokenFlags::FUNCTION;
const RF: TokenFlags = TokenFlags::RESERVED.union(TokenFlags::FUNCTION);
const K: TokenFlags = TokenFlags::NONE;

/// Returns the flags of `word` if it is a keyword (case-insensitive).
#[must_use]
pub fn keyword_flags(word: &str) -> Option<TokenFlags> {
    let flags = match word.to_ascii_uppercase().as_str() {
        // Clause and statement keywords
        "SELECT" | "FROM" | "WHERE" | "HAVING" | "LIMIT" | "UPDATE" | "DELETE" | "INSERT"
        | "INTO" | "SET" | "VALUES" | "UNION" | "WITH" | "WINDOW" | "FOR" | "PROCEDURE"
        | "DISTINCT" | "AS" | "ON" | "USING" | "JOIN" | "INNER" | "CROSS" | "OUTER"
        | "NATURAL" | "STRAIGHT_JOIN" | "GROUP" | "ORDER" | "BY" | "ASC" | "DESC" | "CASE"
        | "WHEN" | "THEN" | "ELSE" | "END" | "PARTITION" | "LOCK" | "KEY" => R,

        // Condition keywords
        "ALL" | "AND" | "OR" | "XOR" | "NOT" | "BETWEEN" | "IN" | "IS" | "LIKE" | "NULL"
        | "EXISTS" | "INTERVAL" | "MATCH" | "REGEXP" | "RLIKE" => R,

        // Reserved words that are also functions
        "IF" | "LEFT" | "RIGHT" | "REPLACE" | "CHAR" | "DATABASE" | "SCHEMA" | "CONVERT"
        | "CURRENT_DATE" | "CURRENT_TIME" | "CURRENT_TIMESTAMP" | "CURRENT_USER"
        | "UTC_DATE" | "UTC_TIMESTAMP" => RF,

        // Functions usable as identifiers
        "COUNT" | "SUM" | "AVG" | "MIN" | "MAX" | "COALESCE" | "IFNULL" | "NULLIF" | "CONCAT"
        | "CONCAT_WS" | "LOWER" | "UPPER" | "LENGTH" | "CHAR_LENGTH" | "SUBSTRING" | "SUBSTR"
        | "TRIM" | "ABS" | "ROUND" | "FLOOR" | "CEIL" | "NOW" | "CURDATE" | "CURTIME" | "DATE"
        | "TIME" | "YEAR" | "MONTH" | "DAY" | "HOUR" | "MINUTE" | "SECOND" | "DATE_ADD"
        | "DATE_SUB" | "DATEDIFF" | "DATE_FORMAT" | "UNIX_TIMESTAMP" | "FIND_IN_SET"
        | "GROUP_CONCAT" | "MD5" | "SHA1" | "PASSWORD" | "CAST" | "POSITION" | "INSTR"
        | "LOCATE" | "GREATEST" | "LEAST" => F,

        // Non-reserved keywords
        "OFFSET" | "FULL" | "UNKNOWN" | "SOUNDS" | "BINARY" | "COLLATE" | "DUPLICATE"
        | "ESCAPE" | "ANY" | "SOME" | "TRUE" | "FALSE" | "DIV" | "MOD" => K,

        _ => return None,
    };
    Some(flags)
}

/// Multi-word keywords merged by the lexer into a single token.
///
/// Only whitespace may separate the words.
pub const COMPOUND_KEYWORDS: &[&str] = &[
    "NOT IN",
    "NOT NULL",
    "GROUP BY",
    "ORDER BY",
    "PARTITION BY",
    "LEFT JOIN",
    "RIGHT JOIN",
    "INNER JOIN",
    "CROSS JOIN",
    "NATURAL JOIN",
    "FULL JOIN",
    "LEFT OUTER JOIN",
    "RIGHT OUTER JOIN",
    "FULL OUTER JOIN",
    "ON DUPLICATE KEY UPDATE",
];

/// A token with its normalized value and its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// The source text, exactly as written.
    pub text: String,
    /// Normalized text: uppercased keywords, unquoted strings and identifiers.
    pub value: String,
    /// The kind of token.
    pub kind: TokenKind,
    /// Keyword flags.
    pub flags: TokenFlags,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token whose value is its text.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            text,
            kind,
            flags: TokenFlags::NONE,
            span,
        }
    }

    /// Creates a keyword token; the value is the uppercased text.
    #[must_use]
    pub fn keyword(text: impl Into<String>, flags: TokenFlags, span: Span) -> Self {
        let text = text.into();
        let value = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        Self {
            text,
            value,
            kind: TokenKind::Keyword,
            flags,
            span,
        }
    }

    /// Replaces the normalized value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Returns true for whitespace and comments.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Returns true if this is the keyword `kw` (compare with the uppercase spelling).
    #[must_use]
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == kw
    }

    /// Returns true if this is the operator `op`.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == op
    }

    /// Returns true if the keyword is reserved.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword) && self.flags.contains(TokenFlags::RESERVED)
    }

    /// Returns true if the keyword names a function.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword) && self.flags.contains(TokenFlags::FUNCTION)
    }
}
