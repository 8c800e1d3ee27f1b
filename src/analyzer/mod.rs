//! セマンティック解析モジュール
//!
//! このモジュールは宣言された型と初期化子の整合性、
//! 変数の再宣言、変数参照の解決を検証します。

mod semantic_analyzer;
mod symbol;
mod type_checker;

// 公開API
pub use semantic_analyzer::SemanticAnalyzer;
pub use symbol::{AnalysisError, AnalysisResult, Scope, Symbol};
pub use type_checker::{accepts, check_literal, expected_description, is_assignable};
