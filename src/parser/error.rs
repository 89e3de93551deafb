//! Parser error types, source spans, and error collection.
//!
//! Consolidates what the teacher crate splits across `error/{mod.rs,
//! parser_error.rs, span.rs}` into one module. Error text is Spanish, to
//! match every other user-facing string this crate produces.

use crate::lexer::token::{Token, TokenType};
use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn from_token(token: &Token) -> Self {
        Self {
            line: token.line,
            column: token.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[linea {}:{}]", self.line, self.column)
    }
}

/// All parser error kinds, centralized and exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    ExpectedToken {
        expected: TokenType,
        got: TokenType,
    },
    NoPrefixParseFunction {
        literal: String,
    },
    InvalidIntegerLiteral {
        literal: String,
    },
    ExpectedParameterIdentifier {
        got: TokenType,
        literal: String,
    },
}

impl fmt::Display for ParserErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedToken { expected, got } => write!(
                f,
                "Se esperaba que el siguiente token fuera {:?} pero se obtuvo {:?}",
                expected, got
            ),
            Self::NoPrefixParseFunction { literal } => write!(
                f,
                "No se encontro ninguna funcion para parsear {}",
                literal
            ),
            Self::InvalidIntegerLiteral { literal } => write!(
                f,
                "No se ha podido parsear {} como entero",
                literal
            ),
            Self::ExpectedParameterIdentifier { got, literal } => write!(
                f,
                "Se esperaba un identificador como parametro, se obtuvo {:?} ('{}')",
                got, literal
            ),
        }
    }
}

/// A parser error together with the span it occurred at.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ParserErrorType,
    pub span: Span,
}

impl ParserError {
    pub fn new(kind: ParserErrorType, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn at_token(kind: ParserErrorType, token: &Token) -> Self {
        Self {
            kind,
            span: Span::from_token(token),
        }
    }

    pub fn expected_token(expected: TokenType, token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::ExpectedToken {
                expected,
                got: token.token_type,
            },
            token,
        )
    }

    pub fn no_prefix_fn(token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::NoPrefixParseFunction {
                literal: token.literal.clone(),
            },
            token,
        )
    }

    pub fn invalid_integer(token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::InvalidIntegerLiteral {
                literal: token.literal.clone(),
            },
            token,
        )
    }

    pub fn expected_param_ident(token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::ExpectedParameterIdentifier {
                got: token.token_type,
                literal: token.literal.clone(),
            },
            token,
        )
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.span, self.kind)
    }
}

impl std::error::Error for ParserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_span_and_spanish_message() {
        let error = ParserError::new(
            ParserErrorType::ExpectedToken {
                expected: TokenType::SEMICOLON,
                got: TokenType::RBRACE,
            },
            Span::new(1, 10),
        );
        assert_eq!(
            error.to_string(),
            "[linea 1:10] Se esperaba que el siguiente token fuera SEMICOLON pero se obtuvo RBRACE"
        );
    }

    #[test]
    fn no_prefix_fn_message() {
        let token = Token::new(TokenType::ILLEGAL, "@".to_string(), 2, 3);
        let error = ParserError::no_prefix_fn(&token);
        assert_eq!(
            error.to_string(),
            "[linea 2:3] No se encontro ninguna funcion para parsear @"
        );
    }
}
