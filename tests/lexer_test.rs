//! レキサーテスト
//!
//! 宣言言語のレキサー（字句解析器）のテストスイート。
//! トークンの分類、位置情報、字句エラーを検証する。

#[cfg(test)]
mod tests {
    use declc::lexer::{format_tokens, lexical_diagnostics, tokenize, Position};
    use declc::{Lexer, Stage, Token, TokenKind, TokenWithPosition};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    /// トークンの型のみを比較するヘルパー関数
    fn extract_tokens(source: &str) -> Vec<Token> {
        Lexer::new(source).map(|t| t.token).collect()
    }

    /// 位置情報付きトークンを取得するヘルパー関数
    fn extract_tokens_with_position(source: &str) -> Vec<TokenWithPosition> {
        Lexer::new(source).collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = extract_tokens("int float double char string bool if else for while");

        let expected = vec![
            Token::Int,
            Token::Float,
            Token::Double,
            Token::Char,
            Token::String,
            Token::Bool,
            Token::If,
            Token::Else,
            Token::For,
            Token::While,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_simple_declaration_yields_five_tokens() {
        let tokens = tokenize("int x = 5;");
        let listing: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            listing,
            vec![
                "Keyword: int",
                "Identifier: x",
                "Operator: =",
                "IntegerLiteral: 5",
                "Operator: ;",
            ]
        );
    }

    #[test_case("42", TokenKind::IntegerLiteral ; "integer")]
    #[test_case("3.14", TokenKind::FloatLiteral ; "float")]
    #[test_case("\"hello\"", TokenKind::StringLiteral ; "string")]
    #[test_case("name", TokenKind::Identifier ; "identifier")]
    #[test_case("true", TokenKind::Identifier ; "boolean is identifier shaped")]
    #[test_case("double", TokenKind::Keyword ; "keyword")]
    #[test_case("*", TokenKind::Operator ; "operator")]
    #[test_case(",", TokenKind::Punctuation ; "punctuation")]
    #[test_case("#", TokenKind::Unknown ; "unknown")]
    fn test_token_kind(source: &str, expected: TokenKind) {
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), expected);
        assert_eq!(tokens[0].lexeme, source);
    }

    #[test]
    fn test_string_literal_keeps_quotes_in_lexeme() {
        let tokens = tokenize(r#"string s = "a b";"#);
        assert_eq!(tokens[3].token, Token::StringLiteral("a b".to_string()));
        assert_eq!(tokens[3].lexeme, "\"a b\"");
    }

    #[test]
    fn test_float_requires_digits_on_both_sides() {
        // `5.` は整数とドットに分かれる
        let tokens = extract_tokens("5. .5");
        assert_eq!(
            tokens,
            vec![
                Token::IntegerLiteral("5".to_string()),
                Token::Dot,
                Token::Dot,
                Token::IntegerLiteral("5".to_string()),
            ]
        );
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens = extract_tokens_with_position("int a = 1;\n  bool b = true;");

        assert_eq!(tokens[0].position, Position { line: 1, column: 1 });
        assert_eq!(tokens[4].position, Position { line: 1, column: 10 });
        assert_eq!(tokens[5].position, Position { line: 2, column: 3 });
        assert_eq!(tokens[8].position, Position { line: 2, column: 12 });
        assert_eq!(tokens[5].span, 13..17);
    }

    #[test]
    fn test_unrecognized_character() {
        let tokens = tokenize("int x = @;");
        assert_eq!(tokens[3].token, Token::Error);
        assert_eq!(tokens[3].lexeme, "@");

        let diagnostics = lexical_diagnostics(&tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].stage, Stage::Lexical);
        assert_eq!(diagnostics[0].message, "unrecognized character `@`");
        assert_eq!(diagnostics[0].position, Position { line: 1, column: 9 });
    }

    #[test]
    fn test_multibyte_unrecognized_character() {
        // 複数バイト文字も1つのエラートークンになる
        let tokens = tokenize("int é = 1;");
        assert_eq!(tokens[1].token, Token::Error);
        assert_eq!(tokens[1].lexeme, "é");
        assert_eq!(tokens[2].position, Position { line: 1, column: 7 });
    }

    #[test]
    fn test_string_across_lines_is_one_literal() {
        // 改行を含む文字列も1つのリテラルで、字句エラーにならない
        let tokens = tokenize("string s = \"a\nb\";\nint y = 1;");
        assert_eq!(tokens[3].token, Token::StringLiteral("a\nb".to_string()));
        assert_eq!(tokens[4].token, Token::Semicolon);
        assert_eq!(tokens[4].position, Position { line: 2, column: 3 });
        assert_eq!(tokens[5].position, Position { line: 3, column: 1 });
        assert!(lexical_diagnostics(&tokens).is_empty());
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("int y = 1;\nstring s = \"oops;");
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[8].token, Token::UnterminatedString("oops;".to_string()));
        assert_eq!(tokens[8].position, Position { line: 2, column: 12 });

        let diagnostics = lexical_diagnostics(&tokens);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unterminated string literal `\"oops;`");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\r\n ").is_empty());
    }

    #[test]
    fn test_format_tokens() {
        let listing = format_tokens(&tokenize("bool b = false;"));
        assert_eq!(
            listing,
            "Keyword: bool @1:1\nIdentifier: b @1:6\nOperator: = @1:8\nIdentifier: false @1:10\nOperator: ; @1:15"
        );
    }
}
