//! エラーハンドリングテスト
//!
//! 解析パイプライン全体の診断を検証する。
//! 段階ごとの報告順、エラーと警告の区別、診断の描画を確認する。

#[cfg(test)]
mod tests {
    use codespan_reporting::term::termcolor::NoColor;
    use declc::{analyze, analyze_with, AnalysisOptions, Session, Severity, Stage};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn stages(source: &str) -> Vec<Stage> {
        analyze(source).diagnostics.all().iter().map(|d| d.stage).collect()
    }

    #[test]
    fn test_clean_input() {
        let analysis = analyze("int a = 1; float b = 2.5; string s = \"ok\"; char c = \"c\"; bool t = true;");
        assert!(analysis.is_clean());
        assert_eq!(analysis.program.declarations.len(), 5);
    }

    #[test]
    fn test_unrecognized_character_yields_lexical_and_syntax_errors() {
        let analysis = analyze("int x = #;");
        let messages: Vec<String> = analysis
            .diagnostics
            .all()
            .iter()
            .map(|d| d.to_string())
            .collect();

        assert_eq!(
            messages,
            vec![
                "lexical error at 1:9: unrecognized character `#`",
                "syntax error at 1:9: expected value, found unrecognized character `#`",
            ]
        );
    }

    #[test_case("int x = 5;", vec![] ; "clean")]
    #[test_case("int = 5;", vec![Stage::Syntax] ; "syntax only")]
    #[test_case("int x = \"s\";", vec![Stage::Semantic] ; "semantic only")]
    #[test_case("int = \"s\";", vec![Stage::Syntax, Stage::Semantic] ; "syntax and salvaged semantic")]
    #[test_case("string s = \"x\nint y = 1;", vec![Stage::Lexical, Stage::Syntax] ; "unterminated string")]
    #[test_case("string s = \"a\nb\";\nint y = 1;", vec![] ; "string across lines")]
    fn test_stages_reported(source: &str, expected: Vec<Stage>) {
        assert_eq!(stages(source), expected);
    }

    #[test]
    fn test_stage_order_within_unit() {
        // 字句 → 構文 → 意味の順に並ぶ
        let analysis = analyze("bool b = 1;\nint = 2;\nint z = $;");
        let found = analysis.diagnostics.all().iter().map(|d| d.stage).collect::<Vec<_>>();
        assert_eq!(
            found,
            vec![Stage::Lexical, Stage::Syntax, Stage::Syntax, Stage::Semantic]
        );
    }

    #[test]
    fn test_nothing_is_deduplicated() {
        let analysis = analyze("int a = \"x\"; int b = \"x\";");
        assert_eq!(analysis.diagnostics.len(), 2);
        assert_eq!(analysis.diagnostics.error_count(), 2);
        assert_eq!(analysis.diagnostics.by_stage(Stage::Semantic).count(), 2);
    }

    #[test]
    fn test_warnings_do_not_fail_analysis() {
        let analysis = analyze("int big = 99999999999;");
        assert!(!analysis.has_errors());
        assert!(analysis.diagnostics.has_warnings());
        assert_eq!(analysis.diagnostics.all()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let source = "int a = 1;\nbool = 3;\nstring s = a;\nchar c = \"ab\"";
        let first = analyze(source);
        let second = analyze(source);
        assert_eq!(first, second);
        assert!(first.has_errors());
    }

    #[test]
    fn test_single_statement_option() {
        let options = AnalysisOptions {
            single_statement: true,
            ..AnalysisOptions::default()
        };

        assert!(analyze_with("int x = 5;", &options).is_clean());

        let analysis = analyze_with("int x = 5; int", &options);
        assert_eq!(
            analysis.diagnostics.all()[0].message,
            "unexpected keyword `int` after statement terminator"
        );
    }

    #[test]
    fn test_redeclaration_option() {
        let source = "int x = 1; int x = 2;";
        assert_eq!(analyze(source).diagnostics.error_count(), 1);

        let options = AnalysisOptions {
            check_redeclarations: false,
            ..AnalysisOptions::default()
        };
        assert!(analyze_with(source, &options).is_clean());
    }

    #[test]
    fn test_rendered_report() {
        let mut session = Session::new(AnalysisOptions::default());
        let (file_id, analysis) = session.analyze_unit("input.decl", "int x = 1;\nint x = 2;");

        let mut out = NoColor::new(Vec::new());
        session.report(&mut out, file_id, &analysis).expect("Failed to render");
        let rendered = String::from_utf8(out.into_inner()).expect("Invalid UTF-8");

        assert!(rendered.contains("semantic error: variable `x` is already declared at 1:5"));
        assert!(rendered.contains("input.decl:2:5"));
    }
}
