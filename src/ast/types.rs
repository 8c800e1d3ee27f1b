//! 型定義

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Span;
use crate::lexer::{Position, Token};

/// 文法が認識する型名（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    Int,
    Float,
    Double,
    Char,
    String,
    Bool,
}

impl TypeName {
    pub const ALL: [TypeName; 6] = [
        TypeName::Int,
        TypeName::Float,
        TypeName::Double,
        TypeName::Char,
        TypeName::String,
        TypeName::Bool,
    ];

    /// 型キーワードのトークンから型名を得る
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Int => Some(TypeName::Int),
            Token::Float => Some(TypeName::Float),
            Token::Double => Some(TypeName::Double),
            Token::Char => Some(TypeName::Char),
            Token::String => Some(TypeName::String),
            Token::Bool => Some(TypeName::Bool),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::Double => "double",
            TypeName::Char => "char",
            TypeName::String => "string",
            TypeName::Bool => "bool",
        }
    }

    /// 浮動小数点型かどうか
    pub fn is_floating(&self) -> bool {
        matches!(self, TypeName::Float | TypeName::Double)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// 宣言中の型指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpec {
    pub name: TypeName,
    pub span: Span,
    pub position: Position,
}
