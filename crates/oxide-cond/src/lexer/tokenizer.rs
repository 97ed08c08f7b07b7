//! SQL Tokenizer implementation.

use super::token::{keyword_flags, COMPOUND_KEYWORDS};
use super::{Span, Token, TokenFlags, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// Whitespace and comments are kept as tokens: the condition parser
/// rebuilds leaf text from them.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the character `n` positions ahead without advancing.
    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances while `pred` holds.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// The source text of the current token.
    fn text(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// Creates a token with the current span and text.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.text(), self.make_span())
    }

    /// Consumes the rest of the input as an `Unknown` token.
    fn unterminated(&mut self) -> Token {
        self.pos = self.input.len();
        self.make_token(TokenKind::Unknown)
    }

    /// Scans a `-- ` or `#` comment up to the end of the line.
    fn scan_line_comment(&mut self) -> Token {
        self.advance_while(|c| c != '\n');
        self.make_token(TokenKind::Comment)
    }

    /// Scans a `/* ... */` comment (the opening `/` is consumed).
    fn scan_block_comment(&mut self) -> Token {
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                None => break,
                _ => {}
            }
        }
        self.make_token(TokenKind::Comment)
    }

    /// Scans a string literal (the opening quote is consumed).
    fn scan_string(&mut self, quote: char) -> Token {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(unescape(escaped)),
                    None => return self.unterminated(),
                },
                Some(c) if c == quote => {
                    // A doubled quote is an escaped quote
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => return self.unterminated(),
            }
        }

        self.make_token(TokenKind::Literal).with_value(value)
    }

    /// Scans a backtick-quoted name part (the opening backtick is consumed).
    ///
    /// Returns `None` when the closing backtick is missing.
    fn scan_backtick_part(&mut self) -> Option<String> {
        let mut part = String::new();
        loop {
            match self.advance()? {
                '`' if self.peek() == Some('`') => {
                    self.advance();
                    part.push('`');
                }
                '`' => return Some(part),
                c => part.push(c),
            }
        }
    }

    /// Continues a qualified name (`a.b`, `` a.`b` ``, `a.*`) after its first part.
    ///
    /// Returns `None` when a quoted part is unterminated.
    fn scan_qualified_tail(&mut self, mut value: String) -> Option<String> {
        while self.peek() == Some('.') {
            match self.peek_at(1) {
                Some('`') => {
                    self.advance(); // .
                    self.advance(); // `
                    value.push('.');
                    value.push_str(&self.scan_backtick_part()?);
                }
                Some('*') => {
                    self.advance();
                    self.advance();
                    value.push_str(".*");
                    break;
                }
                Some(c) if is_word_start(c) => {
                    self.advance(); // .
                    let part_start = self.pos;
                    self.advance_while(is_word_char);
                    value.push('.');
                    value.push_str(&self.input[part_start..self.pos]);
                }
                _ => break,
            }
        }
        Some(value)
    }

    /// Scans a bare word: keyword, identifier or the start of a qualified name.
    fn scan_word(&mut self) -> Token {
        self.advance_while(is_word_char);
        let word = self.text();

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| is_word_start(c) || c == '`' || c == '*') {
            return match self.scan_qualified_tail(word.to_string()) {
                Some(value) => self.make_token(TokenKind::Identifier).with_value(value),
                None => self.unterminated(),
            };
        }

        match keyword_flags(word) {
            Some(flags) => Token::keyword(word, flags, self.make_span()),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a backtick-quoted identifier, possibly qualified.
    fn scan_quoted_identifier(&mut self) -> Token {
        let value = self
            .scan_backtick_part()
            .and_then(|first| self.scan_qualified_tail(first));
        match value {
            Some(value) => self.make_token(TokenKind::Identifier).with_value(value),
            None => self.unterminated(),
        }
    }

    /// Scans a number (integer, decimal, exponent or `0x` hexadecimal).
    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            self.advance_while(|c| c.is_ascii_hexdigit());
            return self.make_token(TokenKind::Literal);
        }

        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if signed {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }

        self.make_token(TokenKind::Literal)
    }

    /// Scans an operator whose first character has been consumed.
    fn scan_operator(&mut self, first: char) -> Token {
        let second = self.peek();
        let len = match (first, second) {
            ('<', Some('=')) if self.peek_at(1) == Some('>') => 3,
            ('<', Some('=' | '>' | '<'))
            | ('>', Some('=' | '>'))
            | ('!' | '^' | ':', Some('='))
            | ('&', Some('&'))
            | ('|', Some('|')) => 2,
            _ => 1,
        };
        for _ in 1..len {
            self.advance();
        }
        self.make_token(TokenKind::Operator)
    }

    /// Scans the next token, or `None` at the end of the input.
    #[must_use]
    pub fn next_token(&mut self) -> Option<Token> {
        self.start = self.pos;
        let c = self.advance()?;

        let token = match c {
            c if c.is_whitespace() => {
                self.advance_while(char::is_whitespace);
                self.make_token(TokenKind::Whitespace)
            }

            // Comments (MySQL requires whitespace after `--`)
            '-' if self.peek() == Some('-')
                && self.peek_at(1).is_none_or(char::is_whitespace) =>
            {
                self.scan_line_comment()
            }
            '#' => self.scan_line_comment(),
            '/' if self.peek() == Some('*') => self.scan_block_comment(),

            ';' => self.make_token(TokenKind::Delimiter),

            // Literals
            '\'' | '"' => self.scan_string(c),
            c if c.is_ascii_digit() => self.scan_number(c),

            // Identifiers, keywords and variables
            '`' => self.scan_quoted_identifier(),
            c if is_word_start(c) => self.scan_word(),
            '@' => {
                if self.peek() == Some('@') {
                    self.advance();
                }
                if self.peek() == Some('`') {
                    self.advance();
                    if self.scan_backtick_part().is_none() {
                        return Some(self.unterminated());
                    }
                } else {
                    self.advance_while(|c| is_word_char(c) || c == '.');
                }
                self.make_token(TokenKind::Identifier)
            }

            // Holes and placeholders
            '?' => {
                self.advance_while(|c| c.is_ascii_digit());
                self.make_token(TokenKind::Hole)
            }
            ':' if self.peek().is_some_and(is_word_start) => {
                self.advance_while(is_word_char);
                self.make_token(TokenKind::Hole)
            }

            '(' | ')' | ',' | '.' | '+' | '-' | '*' | '/' | '%' | '~' | '=' | '<' | '>'
            | '!' | '^' | '&' | '|' | ':' => self.scan_operator(c),

            _ => self.make_token(TokenKind::Unknown),
        };

        Some(token)
    }

    /// Tokenizes the entire input and returns all tokens, compound keywords merged.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        merge_compound_keywords(tokens)
    }
}

const fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Returns the uppercase spelling of a token that can be part of a compound keyword.
fn compound_word(token: &Token) -> Option<String> {
    let bare = token.text.chars().all(is_word_char);
    match token.kind {
        TokenKind::Keyword | TokenKind::Identifier if bare => Some(token.text.to_ascii_uppercase()),
        _ => None,
    }
}

/// Finds the longest compound keyword starting at `start`.
///
/// Returns the index of its last token.
fn compound_end(tokens: &[Token], start: usize) -> Option<usize> {
    let mut phrase = compound_word(&tokens[start])?;
    let mut best = None;
    let mut end = start;

    while let (Some(gap), Some(next)) = (tokens.get(end + 1), tokens.get(end + 2)) {
        if gap.kind != TokenKind::Whitespace {
            break;
        }
        let Some(word) = compound_word(next) else {
            break;
        };
        phrase.push(' ');
        phrase.push_str(&word);
        end += 2;

        if COMPOUND_KEYWORDS.contains(&phrase.as_str()) {
            best = Some(end);
        }
        let prefix = format!("{phrase} ");
        if !COMPOUND_KEYWORDS.iter().any(|kw| kw.starts_with(&prefix)) {
            break;
        }
    }

    best
}

/// Merges multi-word keywords (`NOT IN`, `GROUP BY`, ...) into single tokens.
fn merge_compound_keywords(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        match compound_end(&tokens, i) {
            Some(end) => {
                let text: String = tokens[i..=end].iter().map(|t| t.text.as_str()).collect();
                let span = tokens[i].span.merge(tokens[end].span);
                merged.push(Token::keyword(text, TokenFlags::RESERVED, span));
                i = end + 1;
            }
            None => {
                merged.push(tokens[i].clone());
                i += 1;
            }
        }
    }

    merged
}
