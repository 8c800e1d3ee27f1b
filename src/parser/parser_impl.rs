//! メインパーサー構造とユーティリティ

use crate::ast::{Fragment, Literal, LiteralKind, Program, Span, TypeName, TypeSpec};
use crate::error::{Diagnostic, ParserError};
use crate::lexer::{Position, Token, TokenKind, TokenWithPosition};

use super::{ParseError, ParseResult};

/// 構文解析の結果
///
/// 構文エラーがあっても、解析できた宣言はすべて `program` に含まれます。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub program: Program,
    /// 構文エラーになった文から回収した型と値の組
    pub fragments: Vec<Fragment>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// 宣言文パーサー
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        Self { tokens, current: 0 }
    }

    /// 複数の宣言文を解析
    ///
    /// トークンが残っている限り宣言規則を繰り返します。
    /// 各文は独立しており、1つの文の構文エラーは後続の文の解析を妨げません。
    pub fn parse_program(&mut self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        while !self.is_at_end() {
            let start = self.current;
            match self.parse_declaration() {
                Ok(declaration) => outcome.program.declarations.push(declaration),
                Err(diagnostic) => {
                    log::debug!("syntax error at {}: {}", diagnostic.position, diagnostic.message);
                    outcome.diagnostics.push(diagnostic);
                    self.synchronize();
                    outcome.fragments.extend(self.salvage_fragment(start, self.current));
                }
            }
        }

        outcome.program.span = self.full_span();
        outcome
    }

    /// 単一の宣言文を解析
    ///
    /// 終端の `;` の後にトークンが残っていれば構文エラーとします。
    pub fn parse_single(&mut self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let start = self.current;

        match self.parse_declaration() {
            Ok(declaration) => {
                outcome.program.declarations.push(declaration);
                if let Some(extra) = self.current_token_with_pos() {
                    let found = describe(extra);
                    outcome
                        .diagnostics
                        .push(self.error(ParserError::TrailingToken { found }));
                }
            }
            Err(diagnostic) => {
                log::debug!("syntax error at {}: {}", diagnostic.position, diagnostic.message);
                outcome.diagnostics.push(diagnostic);
                self.synchronize();
                outcome.fragments.extend(self.salvage_fragment(start, self.current));
            }
        }

        outcome.program.span = self.full_span();
        outcome
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 現在のトークンを位置情報付きで取得
    pub(super) fn current_token_with_pos(&self) -> Option<&TokenWithPosition> {
        self.tokens.get(self.current)
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// 特定のトークンを期待し、消費したトークンを返す
    pub(super) fn expect(
        &mut self,
        token_type: Token,
        expected: &str,
    ) -> ParseResult<TokenWithPosition> {
        if !self.check(&token_type) {
            return Err(self.unexpected(expected));
        }
        let token = self.tokens[self.current].clone();
        self.advance();
        Ok(token)
    }

    /// 期待と実際の不一致を表すエラーを作成
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let error = match self.current_token_with_pos() {
            Some(t) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: describe(t),
            },
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
            },
        };
        self.error(error)
    }

    /// 現在位置のエラーを作成
    pub(super) fn error(&self, error: ParserError) -> ParseError {
        let (span, position) = match self.current_token_with_pos() {
            Some(t) => (t.span.clone().into(), t.position),
            None => self.eof_location(),
        };
        Diagnostic::error(error, span, position)
    }

    /// 入力末尾の位置（最後のトークンの直後）
    fn eof_location(&self) -> (Span, Position) {
        match self.tokens.last() {
            Some(last) => {
                let mut position = last.position;
                for ch in last.lexeme.chars() {
                    position.advance(ch);
                }
                (Span::new(last.span.end, last.span.end), position)
            }
            None => (Span::dummy(), Position::new()),
        }
    }

    fn full_span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::dummy(),
        }
    }

    /// 次の `;` の直後まで読み飛ばす
    fn synchronize(&mut self) {
        let from = self.current;
        while !self.is_at_end() {
            let terminator = self.check(&Token::Semicolon);
            self.advance();
            if terminator {
                break;
            }
        }
        log::trace!("resynchronized: skipped tokens {}..{}", from, self.current);
    }

    /// 構文エラーになった文から型キーワードと値の候補を回収
    ///
    /// 文頭が型キーワードで、最初の `=` の直後（`=` が無ければ4番目）の
    /// トークンが値の形をしている場合のみ回収します。
    fn salvage_fragment(&self, start: usize, end: usize) -> Option<Fragment> {
        let statement = self.tokens.get(start..end)?;
        let first = statement.first()?;
        let name = TypeName::from_token(&first.token)?;

        let candidate = match statement.iter().position(|t| t.token == Token::Assign) {
            Some(i) => statement.get(i + 1),
            None => statement.get(3),
        }?;
        let kind = literal_kind(&candidate.token)?;
        let last = statement.last()?;

        Some(Fragment {
            ty: TypeSpec {
                name,
                span: first.span.clone().into(),
                position: first.position,
            },
            value: Literal {
                kind,
                lexeme: candidate.lexeme.clone(),
                span: candidate.span.clone().into(),
                position: candidate.position,
            },
            span: Span::new(first.span.start, last.span.end),
        })
    }
}

/// 値の位置に置けるリテラルの種類
pub(super) fn literal_kind(token: &Token) -> Option<LiteralKind> {
    match token {
        Token::IntegerLiteral(_) => Some(LiteralKind::Integer),
        Token::FloatLiteral(_) => Some(LiteralKind::Float),
        Token::StringLiteral(_) => Some(LiteralKind::String),
        t if t.is_boolean_literal() => Some(LiteralKind::Boolean),
        _ => None,
    }
}

/// エラーメッセージ用のトークンの説明
pub(super) fn describe(t: &TokenWithPosition) -> String {
    if let Some(kind) = literal_kind(&t.token) {
        return format!("{} `{}`", kind, t.lexeme);
    }
    match &t.token {
        Token::UnterminatedString(_) => format!("unterminated string literal `{}`", t.lexeme),
        Token::Error => format!("unrecognized character `{}`", t.lexeme),
        token => match token.kind() {
            TokenKind::Keyword => format!("keyword `{}`", t.lexeme),
            TokenKind::Identifier => format!("identifier `{}`", t.lexeme),
            _ => format!("`{}`", t.lexeme),
        },
    }
}
