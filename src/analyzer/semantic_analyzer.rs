//! セマンティック解析器のメイン実装

use crate::ast::*;
use crate::error::{AnalyzerError, Diagnostic};

use super::symbol::{Scope, Symbol};
use super::type_checker::{check_literal, expected_description, is_assignable};

/// セマンティック解析器
///
/// 1つの入力単位ごとに新しく作成します。解析間で状態は共有しません。
pub struct SemanticAnalyzer {
    /// 宣言済みの変数
    scope: Scope,
    /// 再宣言をエラーにするかどうか
    check_redeclarations: bool,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// ソース順に並べるための解析対象
enum Item<'a> {
    Declaration(&'a Declaration),
    Fragment(&'a Fragment),
}

impl Item<'_> {
    fn start(&self) -> usize {
        match self {
            Item::Declaration(decl) => decl.span.start,
            Item::Fragment(fragment) => fragment.span.start,
        }
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            check_redeclarations: true,
        }
    }

    pub fn with_redeclaration_check(mut self, enabled: bool) -> Self {
        self.check_redeclarations = enabled;
        self
    }

    /// 宣言と回収済みの断片をソース順に検査
    pub fn analyze(&mut self, program: &Program, fragments: &[Fragment]) -> Vec<Diagnostic> {
        let mut items: Vec<Item<'_>> = program
            .declarations
            .iter()
            .map(Item::Declaration)
            .chain(fragments.iter().map(Item::Fragment))
            .collect();
        items.sort_by_key(Item::start);

        let mut diagnostics = Vec::new();
        for item in items {
            match item {
                Item::Declaration(decl) => diagnostics.extend(self.check(decl)),
                Item::Fragment(fragment) => diagnostics.extend(self.check_fragment(fragment)),
            }
        }
        diagnostics
    }

    /// 構文的に正しい宣言を検査し、スコープに登録
    pub fn check(&mut self, decl: &Declaration) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let declared = decl.ty.name;

        // 初期化子は宣言自身が登録される前のスコープで解決する
        let initializer = match &decl.value {
            Value::Literal(literal) => check_literal(declared, literal),
            Value::Variable(ident) => self.check_variable(declared, ident),
        };

        let symbol = Symbol::from_declaration(decl);
        if self.check_redeclarations {
            if let Err(e) = self.scope.define(symbol) {
                diagnostics.push(Diagnostic::error(e, decl.name.span, decl.name.position));
            }
        } else {
            self.scope.shadow(symbol);
        }

        // 変数名は値より前にあるので、再宣言の後に報告する
        diagnostics.extend(initializer);
        diagnostics
    }

    /// 構文エラーの文から回収した断片を検査（スコープには登録しない）
    pub fn check_fragment(&self, fragment: &Fragment) -> Vec<Diagnostic> {
        check_literal(fragment.declared(), &fragment.value)
            .into_iter()
            .collect()
    }

    /// 宣言済みの変数
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// 変数参照による初期化を検査
    fn check_variable(&self, declared: TypeName, ident: &Identifier) -> Option<Diagnostic> {
        let Some(source) = self.scope.lookup(&ident.name) else {
            return Some(Diagnostic::error(
                AnalyzerError::UndefinedVariable {
                    name: ident.name.clone(),
                },
                ident.span,
                ident.position,
            ));
        };

        if is_assignable(declared, source.ty) {
            return None;
        }
        Some(Diagnostic::error(
            AnalyzerError::TypeMismatch {
                declared,
                found: format!("variable `{}` of type `{}`", ident.name, source.ty),
                expected: expected_description(declared).to_string(),
            },
            ident.span,
            ident.position,
        ))
    }
}
