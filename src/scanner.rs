//! Lexical scanner for install scripts.
//!
//! Produces one [`Token`] at a time from the script text: identifiers,
//! double-quoted strings with standard escapes, integer literals (used for
//! octal permission bits), and a catch-all for stray punctuation. `//`
//! line comments are skipped. Tokens are transient — the parser never
//! stores one beyond the current step.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::SyntaxError;

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An identifier: section keyword or command name.
    Ident(String),
    /// A double-quoted string literal, with escapes already resolved.
    Str(String),
    /// An integer literal, kept as raw text (permission bits are octal).
    Int(String),
    /// Any other single character.
    Other(char),
    /// End of input.
    Eof,
}

impl Token {
    /// Raw text of the token, for error messages.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Ident(s) | Self::Str(s) | Self::Int(s) => s.clone(),
            Self::Other(c) => c.to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

/// Streaming tokenizer over a script's source text.
#[derive(Debug)]
pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    /// 1-based line number of the scanner's current position.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Produce the next token, skipping whitespace and `//` comments.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnterminatedString`] if a string literal is
    /// still open at end of input.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_blank();
        let Some(&c) = self.chars.peek() else {
            return Ok(Token::Eof);
        };

        if c == '"' {
            return self.scan_string();
        }
        if c.is_ascii_digit() {
            return Ok(self.scan_while(char::is_ascii_digit, Token::Int));
        }
        if c.is_alphabetic() || c == '_' {
            return Ok(self.scan_while(
                |ch| ch.is_alphanumeric() || *ch == '_',
                Token::Ident,
            ));
        }
        self.chars.next();
        Ok(Token::Other(c))
    }

    /// Skip whitespace and `//` comments, tracking line numbers.
    fn skip_blank(&mut self) {
        loop {
            while let Some(&c) = self.chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                if c == '\n' {
                    self.line += 1;
                }
                self.chars.next();
            }
            if self.peek_comment() {
                for c in self.chars.by_ref() {
                    if c == '\n' {
                        self.line += 1;
                        break;
                    }
                }
            } else {
                return;
            }
        }
    }

    /// Whether the next two characters start a `//` comment.
    fn peek_comment(&mut self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next() == Some('/') && lookahead.next() == Some('/')
    }

    fn scan_while(
        &mut self,
        keep: impl Fn(&char) -> bool,
        wrap: impl Fn(String) -> Token,
    ) -> Token {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if !keep(&c) {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        wrap(text)
    }

    /// Scan a double-quoted string literal, resolving standard escapes.
    /// Unrecognized escapes keep the escaped character literally.
    fn scan_string(&mut self) -> Result<Token, SyntaxError> {
        let start = self.line;
        self.chars.next(); // opening quote
        let mut text = String::new();
        loop {
            match self.chars.next() {
                None => return Err(SyntaxError::UnterminatedString { line: start }),
                Some('"') => return Ok(Token::Str(text)),
                Some('\\') => match self.chars.next() {
                    None => return Err(SyntaxError::UnterminatedString { line: start }),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('0') => text.push('\0'),
                    Some(other) => text.push(other),
                },
                Some('\n') => {
                    self.line += 1;
                    text.push('\n');
                }
                Some(c) => text.push(c),
            }
        }
    }
}
