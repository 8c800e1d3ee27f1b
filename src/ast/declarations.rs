//! 宣言の定義

use serde::Serialize;
use std::fmt;

use super::{ParseNode, Span, TypeName, TypeSpec};
use crate::lexer::Position;

/// `<type> <identifier> = <value> ;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub ty: TypeSpec,
    pub name: Identifier,
    pub assign: Marker,
    pub value: Value,
    pub terminator: Marker,
    pub span: Span,
}

impl Declaration {
    /// 5つの子ノードをソース順で返す
    pub fn children(&self) -> [ParseNode<'_>; 5] {
        let value = match &self.value {
            Value::Literal(lit) => ParseNode::Literal(lit),
            Value::Variable(ident) => ParseNode::Identifier(ident),
        };
        [
            ParseNode::Type(&self.ty),
            ParseNode::Identifier(&self.name),
            ParseNode::AssignmentOperator(&self.assign),
            value,
            ParseNode::Terminator(&self.terminator),
        ]
    }

    pub fn as_node(&self) -> ParseNode<'_> {
        ParseNode::Declaration(self)
    }
}

/// 識別子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
    pub position: Position,
}

/// `=` や `;` のような固定字句のノード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lexeme: String,
    pub span: Span,
    pub position: Position,
}

/// 初期化子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Literal(Literal),
    /// 先行する宣言への参照
    Variable(Identifier),
}

/// リテラルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Boolean,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Integer => write!(f, "integer literal"),
            LiteralKind::Float => write!(f, "float literal"),
            LiteralKind::String => write!(f, "string literal"),
            LiteralKind::Boolean => write!(f, "boolean literal"),
        }
    }
}

/// リテラル
///
/// `lexeme` はソース上の字句そのもの（文字列リテラルなら引用符を含む）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub lexeme: String,
    pub span: Span,
    pub position: Position,
}

impl Literal {
    /// 文字列リテラルの引用符の内側
    pub fn string_contents(&self) -> Option<&str> {
        match self.kind {
            LiteralKind::String => self
                .lexeme
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"')),
            _ => None,
        }
    }
}

/// 構文エラーになった文から回収した型と値の組
///
/// 構文の正否とは独立に意味検査を行うためだけに使います。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub ty: TypeSpec,
    pub value: Literal,
    pub span: Span,
}

impl Fragment {
    pub fn declared(&self) -> TypeName {
        self.ty.name
    }
}
