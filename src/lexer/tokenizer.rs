//! トークン列の生成と字句エラーの抽出

use super::{Lexer, Token, TokenWithPosition};
use crate::error::{Diagnostic, LexerError};

/// ソースコードをトークン化
///
/// 失敗しない全域関数です。認識できない文字は `Token::Error` として残ります。
pub fn tokenize(input: &str) -> Vec<TokenWithPosition> {
    let tokens = Lexer::new(input).collect_tokens();
    log::trace!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    tokens
}

/// エラートークンから字句エラーの診断を作成
pub fn lexical_diagnostics(tokens: &[TokenWithPosition]) -> Vec<Diagnostic> {
    tokens
        .iter()
        .filter_map(|t| {
            let error = match &t.token {
                Token::Error => LexerError::UnrecognizedCharacter {
                    character: t.lexeme.clone(),
                },
                Token::UnterminatedString(_) => LexerError::UnterminatedString {
                    lexeme: t.lexeme.clone(),
                },
                _ => return None,
            };
            Some(Diagnostic::error(error, t.span.clone().into(), t.position))
        })
        .collect()
}

/// トークン列を `Kind: lexeme @line:col` 形式の文字列にする
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| format!("{} @{}", t, t.position))
        .collect::<Vec<_>>()
        .join("\n")
}
