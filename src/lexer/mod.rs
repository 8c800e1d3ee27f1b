//! Lexical analysis module for the declaration language.
//!
//! This module is responsible for tokenizing source text into a stream of tokens.
//! Tokenization is total: characters that do not belong to any token class are
//! turned into error tokens so the parser can point at them precisely.

mod tokenizer;

pub use tokenizer::{format_tokens, lexical_diagnostics, tokenize};

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Token types for the declaration language
#[derive(Logos, Debug, PartialEq, Clone, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Type keywords
    #[token("int")]
    Int,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("char")]
    Char,
    #[token("string")]
    String,
    #[token("bool")]
    Bool,

    // Control keywords (recognized, rejected by the grammar)
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,

    // Identifiers (must come after keywords to avoid conflicts)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    IntegerLiteral(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_owned())]
    FloatLiteral(String),

    // String literals carry their contents without the quotes and may span lines
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_owned()
    })]
    StringLiteral(String),

    // A string that reaches the end of input before its closing quote
    #[regex(r#""[^"]*"#, |lex| lex.slice()[1..].to_owned())]
    UnterminatedString(String),

    // Operators
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Unrecognized character
    Error,
}

/// Coarse token classification used in listings and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    Operator,
    Punctuation,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Int
            | Token::Float
            | Token::Double
            | Token::Char
            | Token::String
            | Token::Bool
            | Token::If
            | Token::Else
            | Token::For
            | Token::While => TokenKind::Keyword,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::IntegerLiteral(_) => TokenKind::IntegerLiteral,
            Token::FloatLiteral(_) => TokenKind::FloatLiteral,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            Token::Assign
            | Token::Plus
            | Token::Minus
            | Token::Star
            | Token::Slash
            | Token::Semicolon
            | Token::LeftParen
            | Token::RightParen
            | Token::LeftBrace
            | Token::RightBrace => TokenKind::Operator,
            Token::Comma | Token::Dot => TokenKind::Punctuation,
            Token::UnterminatedString(_) | Token::Error => TokenKind::Unknown,
        }
    }

    /// `if`, `else`, `for` and `while`
    pub fn is_control_keyword(&self) -> bool {
        matches!(self, Token::If | Token::Else | Token::For | Token::While)
    }

    /// `true` and `false` lex as identifiers but act as reserved literals
    pub fn is_boolean_literal(&self) -> bool {
        matches!(self, Token::Identifier(name) if name == "true" || name == "false")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int => write!(f, "int"),
            Token::Float => write!(f, "float"),
            Token::Double => write!(f, "double"),
            Token::Char => write!(f, "char"),
            Token::String => write!(f, "string"),
            Token::Bool => write!(f, "bool"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::For => write!(f, "for"),
            Token::While => write!(f, "while"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::IntegerLiteral(s) => write!(f, "{}", s),
            Token::FloatLiteral(s) => write!(f, "{}", s),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::UnterminatedString(s) => write!(f, "\"{}", s),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Semicolon => write!(f, ";"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Error => write!(f, "error"),
        }
    }
}

/// Position tracking for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token with its source text and position information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenWithPosition {
    pub token: Token,
    pub lexeme: String,
    pub position: Position,
    pub span: logos::Span,
}

impl TokenWithPosition {
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

impl fmt::Display for TokenWithPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.lexeme)
    }
}

/// Lexer for the declaration language
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    position: Position,
    input: &'a str,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            position: Position::new(),
            input,
            last_end: 0,
        }
    }

    /// Collect every remaining token
    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }

    fn advance_over(&mut self, start: usize, end: usize) {
        if let Some(text) = self.input.get(start..end) {
            for ch in text.chars() {
                self.position.advance(ch);
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let mut span = self.inner.span();

        // Error spans must cover a whole character so that slicing stays valid
        if result.is_err() {
            let width = self
                .input
                .get(span.start..)
                .and_then(|rest| rest.chars().next())
                .map(char::len_utf8)
                .unwrap_or(0);
            if span.start + width > span.end {
                self.inner.bump(span.start + width - span.end);
                span.end = span.start + width;
            }
        }

        // Update position for any skipped content since last token
        if span.start > self.last_end {
            self.advance_over(self.last_end, span.start);
        }

        // Store the position at the start of the token
        let position = self.position;
        self.advance_over(span.start, span.end);
        self.last_end = span.end;

        let lexeme = self.input.get(span.clone()).unwrap_or_default().to_owned();
        let token = result.unwrap_or(Token::Error);

        Some(TokenWithPosition {
            token,
            lexeme,
            position,
            span,
        })
    }
}
