//! The token cursor shared by every parser working on one clause.

use super::{Lexer, Span, Token};
use crate::options::ParseOptions;
use crate::parser::ParseError;

/// An indexed token sequence with a single cursor.
///
/// Every consumer (the condition builder, the leaf classifier, the
/// simple-condition grammars and the statement parser) receives the list by
/// `&mut` and advances the same cursor, so control always resumes right after
/// what the callee consumed.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    idx: usize,
    depth: usize,
    options: ParseOptions,
}

impl TokenList {
    /// Creates a list positioned at its first token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    /// Creates a list with explicit parse options.
    #[must_use]
    pub const fn with_options(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            tokens,
            idx: 0,
            depth: 0,
            options,
        }
    }

    /// Tokenizes `sql` into a new list.
    #[must_use]
    pub fn from_sql(sql: &str) -> Self {
        Self::new(Lexer::new(sql).tokenize())
    }

    /// Tokenizes `sql` into a new list with explicit parse options.
    #[must_use]
    pub fn from_sql_with_options(sql: &str, options: ParseOptions) -> Self {
        Self::with_options(Lexer::new(sql).tokenize(), options)
    }

    /// Creates a nested list one level deeper than this one.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DepthLimitExceeded`] when the nesting limit is reached.
    pub fn child(&self, tokens: Vec<Token>) -> Result<Self, ParseError> {
        self.check_depth(1)?;
        Ok(Self {
            tokens,
            idx: 0,
            depth: self.depth + 1,
            options: self.options,
        })
    }

    /// Fails if `extra` more levels of nesting would exceed the limit.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DepthLimitExceeded`] when the nesting limit is reached.
    pub fn check_depth(&self, extra: usize) -> Result<(), ParseError> {
        if self.depth + extra > self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    /// Nesting level of this list.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The options this list was created with.
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Total number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the list holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens, regardless of the cursor.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The token under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.idx)
    }

    /// The cursor position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.idx
    }

    /// Moves the cursor to `position`, clamped to the end of the list.
    pub fn seek(&mut self, position: usize) {
        self.idx = position.min(self.tokens.len());
    }

    /// Moves the cursor one token forward.
    pub fn advance(&mut self) {
        if self.idx < self.tokens.len() {
            self.idx += 1;
        }
    }

    /// Returns true when every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// The tokens from the cursor to the end.
    #[must_use]
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.idx..]
    }

    /// Clones the tokens in `start..end`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Vec<Token> {
        let end = end.min(self.tokens.len());
        self.tokens
            .get(start..end)
            .map(<[Token]>::to_vec)
            .unwrap_or_default()
    }

    /// Moves the cursor over whitespace and comments.
    pub fn skip_trivia(&mut self) {
        while self.current().is_some_and(Token::is_trivia) {
            self.idx += 1;
        }
    }

    /// Index of the first significant token at or after `from`.
    #[must_use]
    pub fn significant_index(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| !self.tokens[i].is_trivia())
    }

    /// The next significant token, without moving the cursor.
    #[must_use]
    pub fn peek_significant(&self) -> Option<&Token> {
        self.significant_index(self.idx).map(|i| &self.tokens[i])
    }

    /// Skips trivia and returns the token under the cursor, moving past it.
    pub fn next_significant(&mut self) -> Option<Token> {
        self.skip_trivia();
        let token = self.current().cloned()?;
        self.idx += 1;
        Some(token)
    }

    /// Returns true if significant tokens remain after the cursor.
    #[must_use]
    pub fn has_significant(&self) -> bool {
        self.peek_significant().is_some()
    }

    /// Index of the `)` matching the `(` at `open`.
    #[must_use]
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        let mut level = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_operator("(") {
                level += 1;
            } else if token.is_operator(")") {
                level = level.checked_sub(1)?;
                if level == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Index of the `END` matching the `CASE` at `case`.
    #[must_use]
    pub fn matching_end(&self, case: usize) -> Option<usize> {
        let mut level = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(case) {
            if token.is_keyword("CASE") {
                level += 1;
            } else if token.is_keyword("END") {
                level = level.checked_sub(1)?;
                if level == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Span of the token under the cursor, or an empty span at the end of input.
    #[must_use]
    pub fn current_span(&self) -> Span {
        self.current().map_or_else(|| self.end_span(), |t| t.span)
    }

    /// An empty span just past the last token.
    #[must_use]
    pub fn end_span(&self) -> Span {
        self.tokens.last().map_or(Span::at(0), |t| Span::at(t.span.end))
    }
}
