//! パーサーモジュール
//!
//! このモジュールはトークン列を構文木に解析する責任を持ちます。
//! 文法記号ごとに1つの規則を持つ再帰下降構文解析を使用します。
//!
//! ## 文法
//!
//! ```text
//! program     := declaration*
//! declaration := type identifier '=' value ';'
//! type        := int | float | double | char | string | bool
//! value       := IntegerLiteral | FloatLiteral | StringLiteral
//!              | 'true' | 'false' | identifier
//! ```
//!
//! 構文エラーが起きた文は次の `;` まで読み飛ばし（再同期）、
//! 後続の文の解析を続けます。

mod decl_parser;
mod parser_impl;

// 公開API
pub use parser_impl::{ParseOutcome, Parser};

use crate::error::Diagnostic;

pub type ParseError = Diagnostic;
pub type ParseResult<T> = Result<T, ParseError>;
