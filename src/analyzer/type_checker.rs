//! 型チェック機能
//!
//! 宣言型ごとに受け入れるリテラルの種類:
//!
//! | 宣言型 | リテラル |
//! |---|---|
//! | int | 整数 |
//! | float, double | 整数, 浮動小数点数 |
//! | string | 文字列 |
//! | char | ちょうど1文字の文字列 |
//! | bool | `true` / `false` |

use crate::ast::{Literal, LiteralKind, TypeName};
use crate::error::{AnalyzerError, Diagnostic};

/// 宣言型がリテラルの種類を受け入れるか
pub fn accepts(declared: TypeName, kind: LiteralKind) -> bool {
    match declared {
        TypeName::Int => kind == LiteralKind::Integer,
        TypeName::Float | TypeName::Double => {
            matches!(kind, LiteralKind::Integer | LiteralKind::Float)
        }
        TypeName::String | TypeName::Char => kind == LiteralKind::String,
        TypeName::Bool => kind == LiteralKind::Boolean,
    }
}

/// 宣言型が期待するリテラルの説明
pub fn expected_description(declared: TypeName) -> &'static str {
    match declared {
        TypeName::Int => "integer literal",
        TypeName::Float | TypeName::Double => "integer or float literal",
        TypeName::String => "string literal",
        TypeName::Char => "single-character string literal",
        TypeName::Bool => "`true` or `false`",
    }
}

/// 変数 `source` の値で `target` 型の変数を初期化できるか
///
/// 整数から浮動小数点への拡大と、float/double間のみ暗黙に許可します。
pub fn is_assignable(target: TypeName, source: TypeName) -> bool {
    target == source
        || (target.is_floating() && (source == TypeName::Int || source.is_floating()))
}

/// リテラル初期化子を検査
///
/// 型の不一致はエラー、値域外のリテラルは警告になります。
pub fn check_literal(declared: TypeName, literal: &Literal) -> Option<Diagnostic> {
    let error = |kind: AnalyzerError| Some(Diagnostic::error(kind, literal.span, literal.position));
    let warning = |kind: AnalyzerError| Some(Diagnostic::warning(kind, literal.span, literal.position));

    if !accepts(declared, literal.kind) {
        return error(AnalyzerError::TypeMismatch {
            declared,
            found: format!("{} `{}`", literal.kind, literal.lexeme),
            expected: expected_description(declared).to_string(),
        });
    }

    match declared {
        TypeName::Char => {
            let length = literal.string_contents().map_or(0, |s| s.chars().count());
            if length != 1 {
                return error(AnalyzerError::InvalidCharLiteral {
                    lexeme: literal.lexeme.clone(),
                    length,
                });
            }
        }
        TypeName::Int => {
            if literal.lexeme.parse::<i32>().is_err() {
                return warning(AnalyzerError::IntegerOutOfRange {
                    lexeme: literal.lexeme.clone(),
                });
            }
        }
        TypeName::Float | TypeName::Double => {
            let limit = if declared == TypeName::Float {
                f64::from(f32::MAX)
            } else {
                f64::MAX
            };
            let value = literal.lexeme.parse::<f64>().unwrap_or(f64::INFINITY);
            if value > limit {
                return warning(AnalyzerError::FloatOutOfRange {
                    lexeme: literal.lexeme.clone(),
                    declared,
                });
            }
        }
        TypeName::String | TypeName::Bool => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::error::Severity;
    use crate::lexer::Position;

    fn literal(kind: LiteralKind, lexeme: &str) -> Literal {
        Literal {
            kind,
            lexeme: lexeme.to_string(),
            span: Span::new(8, 8 + lexeme.len()),
            position: Position { line: 1, column: 9 },
        }
    }

    #[test]
    fn test_compatibility_table() {
        use LiteralKind::*;

        let table = [
            (TypeName::Int, vec![Integer]),
            (TypeName::Float, vec![Integer, Float]),
            (TypeName::Double, vec![Integer, Float]),
            (TypeName::String, vec![String]),
            (TypeName::Char, vec![String]),
            (TypeName::Bool, vec![Boolean]),
        ];
        for (declared, allowed) in table {
            for kind in [Integer, Float, String, Boolean] {
                assert_eq!(
                    accepts(declared, kind),
                    allowed.contains(&kind),
                    "{} / {}",
                    declared,
                    kind
                );
            }
        }
    }

    #[test]
    fn test_int_rejects_string() {
        let diagnostic = check_literal(TypeName::Int, &literal(LiteralKind::String, "\"hi\""))
            .expect("mismatch expected");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(
            diagnostic.message,
            "type mismatch: cannot initialize `int` with string literal `\"hi\"`, expected integer literal"
        );
    }

    #[test]
    fn test_char_length() {
        assert!(check_literal(TypeName::Char, &literal(LiteralKind::String, "\"a\"")).is_none());
        assert!(check_literal(TypeName::Char, &literal(LiteralKind::String, "\"é\"")).is_none());
        let diagnostic = check_literal(TypeName::Char, &literal(LiteralKind::String, "\"ab\""))
            .expect("length error expected");
        assert!(matches!(
            diagnostic.kind,
            crate::error::DiagnosticKind::Semantic(AnalyzerError::InvalidCharLiteral { length: 2, .. })
        ));
        assert!(check_literal(TypeName::Char, &literal(LiteralKind::String, "\"\"")).is_some());
    }

    #[test]
    fn test_range_warnings() {
        let big = check_literal(TypeName::Int, &literal(LiteralKind::Integer, "2147483648"))
            .expect("warning expected");
        assert_eq!(big.severity, Severity::Warning);
        assert!(check_literal(TypeName::Int, &literal(LiteralKind::Integer, "2147483647")).is_none());

        let huge = "9".repeat(40);
        let float = check_literal(TypeName::Float, &literal(LiteralKind::Integer, &huge));
        assert_eq!(float.map(|d| d.severity), Some(Severity::Warning));
        assert!(check_literal(TypeName::Double, &literal(LiteralKind::Integer, &huge)).is_none());
    }

    #[test]
    fn test_assignability() {
        assert!(is_assignable(TypeName::Float, TypeName::Int));
        assert!(is_assignable(TypeName::Double, TypeName::Float));
        assert!(is_assignable(TypeName::Float, TypeName::Double));
        assert!(!is_assignable(TypeName::Int, TypeName::Float));
        assert!(!is_assignable(TypeName::String, TypeName::Char));
        assert!(!is_assignable(TypeName::Bool, TypeName::Int));
    }
}
