//! Declaration Language Front-end Library
//!
//! This library provides the lexer, parser and semantic checker for a small
//! C-like declaration language (`<type> <identifier> = <value> ;`).
//! Every finding is returned as data through [`DiagnosticCollector`].

pub mod analyzer;
pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use analyzer::SemanticAnalyzer;
pub use ast::{Declaration, ParseNode, Program, TypeName};
pub use compiler::{analyze, analyze_with, Analysis, AnalysisOptions, AnalysisPipeline, Session};
pub use error::{Diagnostic, DiagnosticCollector, Severity, Stage};
pub use lexer::{tokenize, Lexer, Token, TokenKind, TokenWithPosition};
pub use parser::{ParseOutcome, Parser};
