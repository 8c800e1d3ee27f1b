//! 宣言文の解析

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::parser_impl::literal_kind;
use super::{ParseResult, Parser};

impl Parser {
    /// declaration := type identifier '=' value ';'
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let ty = self.parse_type()?;
        let name = self.parse_identifier()?;
        let assign = marker(self.expect(Token::Assign, "`=`")?);
        let value = self.parse_value()?;
        let terminator = marker(self.expect(Token::Semicolon, "`;`")?);
        let span = ty.span.to(terminator.span);

        Ok(Declaration {
            ty,
            name,
            assign,
            value,
            terminator,
            span,
        })
    }

    /// type := int | float | double | char | string | bool
    pub(super) fn parse_type(&mut self) -> ParseResult<TypeSpec> {
        let Some(current) = self.current_token_with_pos() else {
            return Err(self.unexpected("type keyword"));
        };

        if let Some(name) = TypeName::from_token(&current.token) {
            let ty = TypeSpec {
                name,
                span: current.span.clone().into(),
                position: current.position,
            };
            self.advance();
            return Ok(ty);
        }

        match &current.token {
            token if token.is_control_keyword() => {
                Err(self.error(ParserError::UnsupportedStatement {
                    keyword: current.lexeme.clone(),
                }))
            }
            Token::Identifier(name) if !current.token.is_boolean_literal() => {
                Err(self.error(ParserError::UnknownType { name: name.clone() }))
            }
            _ => Err(self.unexpected("type keyword")),
        }
    }

    /// 宣言される変数名
    pub(super) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        match self.current_token_with_pos() {
            Some(t) if matches!(t.token, Token::Identifier(_)) && !t.token.is_boolean_literal() => {
                let ident = identifier(t);
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// value := IntegerLiteral | FloatLiteral | StringLiteral | 'true' | 'false' | identifier
    pub(super) fn parse_value(&mut self) -> ParseResult<Value> {
        let Some(current) = self.current_token_with_pos() else {
            return Err(self.unexpected("value"));
        };

        let value = if let Some(kind) = literal_kind(&current.token) {
            Value::Literal(Literal {
                kind,
                lexeme: current.lexeme.clone(),
                span: current.span.clone().into(),
                position: current.position,
            })
        } else if matches!(current.token, Token::Identifier(_)) {
            Value::Variable(identifier(current))
        } else {
            return Err(self.unexpected("value"));
        };

        self.advance();
        Ok(value)
    }
}

fn identifier(t: &TokenWithPosition) -> Identifier {
    Identifier {
        name: t.lexeme.clone(),
        span: t.span.clone().into(),
        position: t.position,
    }
}

fn marker(t: TokenWithPosition) -> Marker {
    Marker {
        lexeme: t.lexeme,
        span: t.span.into(),
        position: t.position,
    }
}
