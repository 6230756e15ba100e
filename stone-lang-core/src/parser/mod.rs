pub mod error;
pub mod expressions;
pub mod statements;

use crate::ast::{Identifier, Program};
use crate::lexer::{Token, TokenKind, Tokenizer};
pub use error::{Expected, ParseError};
use statements::parse_statement;

/// Recursive descent parser over a two token window: `current` is the next
/// token to be consumed and `peek` the one after it.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let peek = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            peek,
        }
    }

    /// Shifts the window by one token and returns the token that was consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.tokenizer.next_token();
        let peek = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.current, peek)
    }

    pub(crate) fn parse_ident(&mut self) -> Result<Identifier, ParseError> {
        match &self.current.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(Identifier { name })
            }
            _ => Err(ParseError::unexpected_other(
                Expected::Identifier,
                &self.current,
            )),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, ParseError> {
        if self.current.kind == token_kind {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected_token(token_kind, &self.current))
        }
    }

    /// Parses statements until the end of input.
    ///
    /// A failing statement does not stop the parse: the error is recorded,
    /// tokens are skipped up to the start of the next statement and parsing
    /// resumes, so every independent mistake in the input is reported at once.
    pub fn parse_program(&mut self) -> Result<Program, Vec<ParseError>> {
        let mut statements = Vec::new();

        let mut errors = Vec::new();

        while self.current.kind != TokenKind::Eof {
            match parse_statement(self) {
                Ok(statement) => {
                    statements.push(statement);
                }
                Err(err) => {
                    errors.push(err);
                    self.synchronize();
                }
            }
        }
        if errors.is_empty() {
            Ok(Program { statements })
        } else {
            Err(errors)
        }
    }

    fn synchronize(&mut self) {
        if self.current.kind != TokenKind::Eof {
            self.advance();
        }
        while self.current.kind != TokenKind::Eof && !self.at_statement_start() {
            self.advance();
        }
    }

    fn at_statement_start(&self) -> bool {
        match self.current.kind {
            TokenKind::If
            | TokenKind::Loop
            | TokenKind::For
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue => true,
            TokenKind::Ident(_) => {
                self.peek.kind == TokenKind::Assign
                    || statements::compound_operation(&self.peek.kind).is_some()
            }
            _ => false,
        }
    }
}
