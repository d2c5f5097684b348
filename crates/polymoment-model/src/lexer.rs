//! Tokenizer for polynomial expressions.

use std::fmt;

use polymoment_integers::{Integer, Rational};

use crate::error::ParseError;

/// Largest power of ten accepted in scientific notation.
const MAX_DECIMAL_EXPONENT: i64 = 4_096;

/// A token with its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub position: usize,
}

/// Kinds of token in the expression language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// An exact numeric literal.
    Number(Rational),
    /// An identifier.
    Ident(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Times,
    /// `/`
    Divide,
    /// `**` or `^`
    Power,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Times => write!(f, "*"),
            TokenKind::Divide => write!(f, "/"),
            TokenKind::Power => write!(f, "**"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Converts an input string into tokens.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Tokenizes the whole input; the last token is always [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on characters outside the language or
    /// malformed numeric literals.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.position;
        let token = |kind| Token {
            kind,
            position: start,
        };

        let Some(ch) = self.current_char() else {
            return Ok(token(TokenKind::Eof));
        };

        let kind = match ch {
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '*' => {
                self.advance();
                if self.current_char() == Some('*') {
                    self.advance();
                    TokenKind::Power
                } else {
                    TokenKind::Times
                }
            }
            '/' => {
                self.advance();
                TokenKind::Divide
            }
            '^' => {
                self.advance();
                TokenKind::Power
            }
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            c if c.is_ascii_digit() || c == '.' => TokenKind::Number(self.read_number(start)?),
            c if c.is_alphabetic() || c == '_' => TokenKind::Ident(self.read_identifier()),
            c => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: c,
                    position: start,
                })
            }
        };
        Ok(token(kind))
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        self.input[start..self.position].to_string()
    }

    fn read_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Reads `digits[.digits][e[+-]digits]` as an exact rational.
    fn read_number(&mut self, start: usize) -> Result<Rational, ParseError> {
        self.read_digits();
        if self.current_char() == Some('.') {
            self.advance();
            self.read_digits();
        }
        let mantissa_end = self.position;

        // Scientific notation only when digits follow the marker
        let mut exponent: i64 = 0;
        if matches!(self.current_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                let negative = self.peek_char(1) == Some('-');
                self.advance();
                if signed {
                    self.advance();
                }
                let digits_start = self.position;
                self.read_digits();
                let invalid = || ParseError::InvalidNumber {
                    literal: self.input[start..self.position].to_string(),
                    position: start,
                };
                let magnitude: i64 = self.input[digits_start..self.position]
                    .parse()
                    .ok()
                    .filter(|m| *m <= MAX_DECIMAL_EXPONENT)
                    .ok_or_else(invalid)?;
                exponent = if negative { -magnitude } else { magnitude };
            }
        }

        let literal = &self.input[start..mantissa_end];
        let invalid = || ParseError::InvalidNumber {
            literal: self.input[start..self.position].to_string(),
            position: start,
        };
        let mantissa: Rational = literal.parse().map_err(|_| invalid())?;
        let scale = Rational::from(Integer::new(10))
            .checked_powi(exponent)
            .ok_or_else(invalid)?;
        Ok(mantissa * scale)
    }
}
