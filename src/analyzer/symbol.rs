//! シンボルテーブル

use crate::ast::{Declaration, Span, TypeName};
use crate::error::AnalyzerError;
use crate::lexer::Position;
use indexmap::IndexMap;

pub type AnalysisError = AnalyzerError;
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// シンボル情報
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: TypeName,
    pub span: Span,
    pub position: Position,
}

impl Symbol {
    pub fn from_declaration(decl: &Declaration) -> Self {
        Self {
            name: decl.name.name.clone(),
            ty: decl.ty.name,
            span: decl.name.span,
            position: decl.name.position,
        }
    }
}

/// 変数のスコープ
///
/// 宣言順を保持するため `IndexMap` を使います。
#[derive(Debug, Default)]
pub struct Scope {
    symbols: IndexMap<String, Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// シンボルを定義（同名が既にあればエラー）
    pub fn define(&mut self, symbol: Symbol) -> AnalysisResult<()> {
        if let Some(previous) = self.symbols.get(&symbol.name) {
            return Err(AnalysisError::DuplicateVariable {
                name: symbol.name.clone(),
                previous: previous.position,
            });
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// シンボルを定義（同名があれば置き換える）
    pub fn shadow(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// 宣言順のシンボル
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
