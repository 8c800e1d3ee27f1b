//! 解析パイプラインモジュール
//!
//! このモジュールは字句解析 → 構文解析 → 意味解析のパイプライン全体を管理し、
//! 各段階の診断を1つのコレクターに発見順で蓄積します。

use crate::analyzer::SemanticAnalyzer;
use crate::ast::Program;
use crate::error::DiagnosticCollector;
use crate::lexer::{lexical_diagnostics, tokenize, TokenWithPosition};
use crate::parser::{ParseOutcome, Parser};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::{self, termcolor::WriteColor};

/// 解析オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// 入力を単一の宣言文として解析し、終端後のトークンをエラーにする
    pub single_statement: bool,
    /// 同じ入力単位内での変数の再宣言をエラーにする
    pub check_redeclarations: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            single_statement: false,
            check_redeclarations: true,
        }
    }
}

/// 1つの入力単位の解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<TokenWithPosition>,
    pub program: Program,
    pub diagnostics: DiagnosticCollector,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// 診断が1つも無いかどうか
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// デフォルトのオプションで入力全体を解析
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, &AnalysisOptions::default())
}

/// 指定したオプションで入力全体を解析
pub fn analyze_with(source: &str, options: &AnalysisOptions) -> Analysis {
    AnalysisPipeline::new(source, *options).run()
}

/// 解析パイプライン
pub struct AnalysisPipeline<'src> {
    source: &'src str,
    options: AnalysisOptions,
    diagnostics: DiagnosticCollector,
}

impl<'src> AnalysisPipeline<'src> {
    /// 新しい解析パイプラインを作成
    pub fn new(source: &'src str, options: AnalysisOptions) -> Self {
        Self {
            source,
            options,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// 蓄積された診断
    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    /// 字句解析を実行
    pub fn tokenize(&mut self) -> Vec<TokenWithPosition> {
        log::debug!("Starting lexical analysis");
        let tokens = tokenize(self.source);
        self.diagnostics.extend(lexical_diagnostics(&tokens));
        tokens
    }

    /// 構文解析を実行
    ///
    /// 字句エラーがあっても解析は続行します（エラートークンは構文エラーとして現れる）。
    pub fn parse(&mut self, tokens: Vec<TokenWithPosition>) -> ParseOutcome {
        log::debug!("Starting parsing of {} tokens", tokens.len());
        let mut parser = Parser::new(tokens);
        let mut outcome = if self.options.single_statement {
            parser.parse_single()
        } else {
            parser.parse_program()
        };
        self.diagnostics.extend(std::mem::take(&mut outcome.diagnostics));
        outcome
    }

    /// セマンティック解析を実行
    ///
    /// 構文の正否に関係なく、解析できた宣言と回収した断片を検査します。
    pub fn check(&mut self, outcome: &ParseOutcome) {
        log::debug!(
            "Starting semantic analysis of {} declarations and {} fragments",
            outcome.program.declarations.len(),
            outcome.fragments.len()
        );
        let mut analyzer =
            SemanticAnalyzer::new().with_redeclaration_check(self.options.check_redeclarations);
        self.diagnostics
            .extend(analyzer.analyze(&outcome.program, &outcome.fragments));
    }

    /// パイプライン全体を実行
    pub fn run(mut self) -> Analysis {
        let tokens = self.tokenize();
        let outcome = self.parse(tokens.clone());
        self.check(&outcome);

        log::debug!(
            "Analysis finished: {} errors, {} warnings",
            self.diagnostics.error_count(),
            self.diagnostics.warning_count()
        );

        Analysis {
            tokens,
            program: outcome.program,
            diagnostics: self.diagnostics,
        }
    }
}

/// 複数の入力単位にまたがる解析のコンテキスト
///
/// 解析した単位の数と、診断の描画に使うソースを保持します。
/// 解析そのものは単位ごとに独立しており、単位間で状態を共有しません。
pub struct Session {
    options: AnalysisOptions,
    files: SimpleFiles<String, String>,
    units: usize,
}

impl Session {
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            options,
            files: SimpleFiles::new(),
            units: 0,
        }
    }

    /// 入力単位を登録して解析し、ファイルIDと結果を返す
    pub fn analyze_unit(&mut self, name: impl Into<String>, source: &str) -> (usize, Analysis) {
        let name = name.into();
        log::debug!("Analyzing {}", name);
        let file_id = self.files.add(name, source.to_string());
        self.units += 1;
        (file_id, analyze_with(source, &self.options))
    }

    /// 解析済みの単位の数
    pub fn units_analyzed(&self) -> usize {
        self.units
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// 診断情報を報告
    pub fn report(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        analysis: &Analysis,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        for diagnostic in analysis.diagnostics.all() {
            term::emit(writer, &config, &self.files, &diagnostic.to_codespan(file_id))?;
        }
        Ok(())
    }
}
