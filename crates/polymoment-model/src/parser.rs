//! Recursive descent parser producing an expression tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := number | identifier | '(' sum ')'
//! ```
//!
//! `**` is right associative and binds tighter than unary minus, so
//! `-x**2` is `-(x**2)` while `x**-1` is `x**(-1)`.

use hashbrown::HashSet;
use polymoment_integers::Rational;

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

const END: &TokenKind = &TokenKind::Eof;

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A numeric literal.
    Number(Rational),
    /// A declared variable.
    Variable(String),
    /// Unary minus.
    Neg(Box<Node>),
    /// `a + b`
    Add(Box<Node>, Box<Node>),
    /// `a - b`
    Sub(Box<Node>, Box<Node>),
    /// `a * b`
    Mul(Box<Node>, Box<Node>),
    /// `a / b`
    Div(Box<Node>, Box<Node>),
    /// `a ** b`
    Pow(Box<Node>, Box<Node>),
}

/// Parser over a token stream, checking identifiers against a declared set.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    declared: &'a HashSet<String>,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source` and prepares a parser.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input cannot be tokenized.
    pub fn from_source(source: &str, declared: &'a HashSet<String>) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Parser {
            tokens,
            current: 0,
            declared,
        })
    }

    /// Parses a complete expression; trailing tokens are an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for syntax errors, undeclared variables, and
    /// function calls.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.sum()?;
        match self.peek() {
            TokenKind::Eof => Ok(node),
            _ => Err(self.unexpected("an operator or end of input")),
        }
    }

    fn sum(&mut self) -> Result<Node, ParseError> {
        let mut node = self.product()?;
        loop {
            if self.match_token(&TokenKind::Plus) {
                node = Node::Add(Box::new(node), Box::new(self.product()?));
            } else if self.match_token(&TokenKind::Minus) {
                node = Node::Sub(Box::new(node), Box::new(self.product()?));
            } else {
                return Ok(node);
            }
        }
    }

    fn product(&mut self) -> Result<Node, ParseError> {
        let mut node = self.unary()?;
        loop {
            if self.match_token(&TokenKind::Times) {
                node = Node::Mul(Box::new(node), Box::new(self.unary()?));
            } else if self.match_token(&TokenKind::Divide) {
                node = Node::Div(Box::new(node), Box::new(self.unary()?));
            } else {
                return Ok(node);
            }
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.match_token(&TokenKind::Minus) {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        if self.match_token(&TokenKind::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.match_token(&TokenKind::Power) {
            // Right associative
            let exponent = self.unary()?;
            return Ok(Node::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        match self.peek().clone() {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Node::Number(value))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    return Err(ParseError::UnsupportedFunction { name });
                }
                if !self.declared.contains(&name) {
                    return Err(ParseError::UndeclaredVariable { name });
                }
                Ok(Node::Variable(name))
            }
            TokenKind::LeftParen => {
                self.advance();
                let node = self.sum()?;
                self.consume(&TokenKind::RightParen, "`)`")?;
                Ok(node)
            }
            _ => Err(self.unexpected("a number, variable or `(`")),
        }
    }

    // Helper methods

    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.current).map_or(END, |t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.current).map_or(0, |t| t.position)
    }

    fn advance(&mut self) {
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.match_token(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            TokenKind::Eof => ParseError::UnexpectedEnd { expected },
            other => ParseError::UnexpectedToken {
                expected,
                found: other.to_string(),
                position: self.position(),
            },
        }
    }
}
