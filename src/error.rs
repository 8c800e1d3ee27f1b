//! 診断情報モジュール
//!
//! 字句解析・構文解析・意味解析の各段階で発見された問題を、
//! 位置情報付きの診断として統一的に扱います。診断は制御フローとして
//! 投げられることはなく、常にデータとして呼び出し側へ返されます。

use crate::ast::{Span, TypeName};
use crate::lexer::Position;
use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 診断を発見した解析段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => write!(f, "lexical"),
            Stage::Syntax => write!(f, "syntax"),
            Stage::Semantic => write!(f, "semantic"),
        }
    }
}

/// 診断の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// 診断の種類
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum DiagnosticKind {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Syntax(#[from] ParserError),

    #[error(transparent)]
    Semantic(#[from] AnalyzerError),
}

impl DiagnosticKind {
    pub fn stage(&self) -> Stage {
        match self {
            DiagnosticKind::Lexical(_) => Stage::Lexical,
            DiagnosticKind::Syntax(_) => Stage::Syntax,
            DiagnosticKind::Semantic(_) => Stage::Semantic,
        }
    }
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum LexerError {
    #[error("unrecognized character `{character}`")]
    UnrecognizedCharacter { character: String },

    #[error("unterminated string literal `{lexeme}`")]
    UnterminatedString { lexeme: String },
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ParserError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },

    #[error("unknown type name `{name}`, expected one of int, float, double, char, string, bool")]
    UnknownType { name: String },

    #[error("`{keyword}` statements are not supported, only declarations are allowed")]
    UnsupportedStatement { keyword: String },

    #[error("unexpected {found} after statement terminator")]
    TrailingToken { found: String },
}

/// セマンティック解析エラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum AnalyzerError {
    #[error("type mismatch: cannot initialize `{declared}` with {found}, expected {expected}")]
    TypeMismatch {
        declared: TypeName,
        found: String,
        expected: String,
    },

    #[error("`char` requires a string literal of exactly one character, found `{lexeme}` with {length} characters")]
    InvalidCharLiteral { lexeme: String, length: usize },

    #[error("use of undeclared variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("variable `{name}` is already declared at {previous}")]
    DuplicateVariable { name: String, previous: Position },

    #[error("integer literal `{lexeme}` does not fit in a 32-bit `int`")]
    IntegerOutOfRange { lexeme: String },

    #[error("literal `{lexeme}` is out of range for `{declared}`")]
    FloatOutOfRange { lexeme: String, declared: TypeName },
}

/// 位置情報付きの診断
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub severity: Severity,
    pub message: String,
    pub kind: DiagnosticKind,
    pub span: Span,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(
        kind: impl Into<DiagnosticKind>,
        severity: Severity,
        span: Span,
        position: Position,
    ) -> Self {
        let kind = kind.into();
        Self {
            stage: kind.stage(),
            severity,
            message: kind.to_string(),
            kind,
            span,
            position,
        }
    }

    pub fn error(kind: impl Into<DiagnosticKind>, span: Span, position: Position) -> Self {
        Self::new(kind, Severity::Error, span, position)
    }

    pub fn warning(kind: impl Into<DiagnosticKind>, span: Span, position: Position) -> Self {
        Self::new(kind, Severity::Warning, span, position)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_codespan(&self, file_id: usize) -> CodespanDiagnostic<usize> {
        let diagnostic = match self.severity {
            Severity::Error => CodespanDiagnostic::error(),
            Severity::Warning => CodespanDiagnostic::warning(),
        };

        let mut label = Label::primary(file_id, self.span.start..self.span.end);
        if let Some(message) = self.label_message() {
            label = label.with_message(message);
        }

        diagnostic
            .with_message(format!("{} {}: {}", self.stage, self.severity, self.message))
            .with_labels(vec![label])
    }

    fn label_message(&self) -> Option<&'static str> {
        match &self.kind {
            DiagnosticKind::Lexical(LexerError::UnrecognizedCharacter { .. }) => {
                Some("この文字は認識できません")
            }
            DiagnosticKind::Lexical(LexerError::UnterminatedString { .. }) => {
                Some("文字列が閉じられていません")
            }
            DiagnosticKind::Syntax(ParserError::TrailingToken { .. }) => {
                Some("文の終端の後に余分なトークンがあります")
            }
            DiagnosticKind::Syntax(_) => None,
            DiagnosticKind::Semantic(AnalyzerError::DuplicateVariable { .. }) => {
                Some("重複した定義")
            }
            DiagnosticKind::Semantic(AnalyzerError::UndefinedVariable { .. }) => {
                Some("この変数は定義されていません")
            }
            DiagnosticKind::Semantic(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}: {}",
            self.stage, self.severity, self.position, self.message
        )
    }
}

/// 全段階の診断を発見順に蓄積するコレクター
///
/// フィルタリングや重複排除は一切行いません。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 診断を追加
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 複数の診断を順序を保って追加
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// 警告があるかどうか
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| !d.is_error())
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// 警告の数
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// すべての診断を発見順に取得
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 特定の段階の診断のみを取得
    pub fn by_stage(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.stage == stage)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollector {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
