use std::fmt::Display;

use thiserror::Error;

use crate::lexer::{Position, Token, TokenKind};

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("{position}: unexpected end of input, expected {expected}")]
    PrematureEndOfInput {
        expected: Expected,
        position: Position,
    },
    #[error("{}: expected {expected}, got {}", .got.position, .got.kind)]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("{}: could not parse {} as a number", .0.position, .0.kind)]
    InvalidNumber(Token),
    #[error("{}: no expression can start with {}", .0.position, .0.kind)]
    NoPrefixFunction(Token),
    #[error("{}: {}", .0.position, .0.kind)]
    IllegalToken(Token),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Identifier => write!(f, "an identifier"),
            Expected::Expression => write!(f, "an expression"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_expression(position: Position) -> ParseError {
        ParseError::PrematureEndOfInput {
            expected: Expected::Expression,
            position,
        }
    }

    pub fn unexpected_token(expected: TokenKind, got: &Token) -> ParseError {
        ParseError::unexpected_other(Expected::Token(expected), got)
    }

    pub fn unexpected_other(expected: Expected, got: &Token) -> ParseError {
        match got.kind {
            TokenKind::Eof => ParseError::PrematureEndOfInput {
                expected,
                position: got.position,
            },
            _ => ParseError::UnexpectedToken {
                expected,
                got: got.clone(),
            },
        }
    }

    /// Where in the source the error was detected.
    pub fn position(&self) -> Position {
        match self {
            ParseError::PrematureEndOfInput { position, .. } => *position,
            ParseError::UnexpectedToken { got, .. } => got.position,
            ParseError::InvalidNumber(token)
            | ParseError::NoPrefixFunction(token)
            | ParseError::IllegalToken(token) => token.position,
        }
    }
}
