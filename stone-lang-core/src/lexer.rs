use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Illegal(Rc<str>),
    Ident(Rc<str>),
    Number(Rc<str>),
    Text(Rc<str>),
    Eof,

    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,

    PlusAssign,
    MinusAssign,
    AsteriskAssign,
    SlashAssign,

    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    Comma,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Not,
    And,
    Or,
    For,
    In,
    Do,
    Loop,
    Break,
    Continue,
    Function,
    If,
    Then,
    Else,
    Elseif,
    Return,
    End,
    True,
    False,
    Nil,
}

/// Line and column (both 1-based, columns count code points) where a token
/// starts.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    /// The literal text of the token: the payload for identifiers, numbers,
    /// text and illegal characters, the fixed spelling for everything else.
    pub fn text(&self) -> &str {
        self.kind.as_str()
    }
}

impl TokenKind {
    pub fn as_str(&self) -> &str {
        use TokenKind::*;
        match self {
            Illegal(val) | Ident(val) | Number(val) | Text(val) => val,
            Eof => "",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            PlusAssign => "+=",
            MinusAssign => "-=",
            AsteriskAssign => "*=",
            SlashAssign => "/=",
            Equal => "==",
            NotEqual => "!=",
            LessThan => "<",
            LessEqual => "<=",
            GreaterThan => ">",
            GreaterEqual => ">=",
            Comma => ",",
            Dot => ".",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Not => "not",
            And => "and",
            Or => "or",
            For => "for",
            In => "in",
            Do => "do",
            Loop => "loop",
            Break => "break",
            Continue => "continue",
            Function => "func",
            If => "if",
            Then => "then",
            Else => "else",
            Elseif => "elseif",
            Return => "return",
            End => "end",
            True => "true",
            False => "false",
            Nil => "nil",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            Illegal(val) => write!(f, "illegal character `{}`", val),
            Ident(val) => write!(f, "identifier `{}`", val),
            Number(val) => write!(f, "number `{}`", val),
            Text(val) => write!(f, "text \"{}\"", val),
            Eof => write!(f, "end of input"),
            other => write!(f, "`{}`", other.as_str()),
        }
    }
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "not" => Some(TokenKind::Not),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "for" => Some(TokenKind::For),
        "in" => Some(TokenKind::In),
        "do" => Some(TokenKind::Do),
        "loop" => Some(TokenKind::Loop),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "func" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "then" => Some(TokenKind::Then),
        "else" => Some(TokenKind::Else),
        "elseif" => Some(TokenKind::Elseif),
        "return" => Some(TokenKind::Return),
        "end" => Some(TokenKind::End),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "nil" => Some(TokenKind::Nil),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            position: Position::default(),
        }
    }

    /// Scans the next token. Once the input is exhausted every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let position = self.position;
        let Some((idx, ch)) = self.bump() else {
            return Token {
                kind: TokenKind::Eof,
                position,
            };
        };

        let kind = match ch {
            '=' => self.either('=', TokenKind::Equal, TokenKind::Assign),
            '+' => self.either('=', TokenKind::PlusAssign, TokenKind::Plus),
            '-' => self.either('=', TokenKind::MinusAssign, TokenKind::Minus),
            '*' => self.either('=', TokenKind::AsteriskAssign, TokenKind::Asterisk),
            '/' => self.either('=', TokenKind::SlashAssign, TokenKind::Slash),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::LessThan),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '!' => self.either('=', TokenKind::NotEqual, TokenKind::Illegal("!".into())),
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => self.read_text(idx),
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if c.is_ascii_digit() => self.read_number(idx),
            _ => TokenKind::Illegal(ch.to_string().into()),
        };

        Token { kind, position }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let (idx, ch) = self.iter.next()?;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some((idx, ch))
    }

    fn bump_if(&mut self, func: impl FnOnce(char) -> bool) -> Option<(usize, char)> {
        match self.iter.peek() {
            Some(&(_, ch)) if func(ch) => self.bump(),
            _ => None,
        }
    }

    fn either(&mut self, second: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.bump_if(|ch| ch == second).is_some() {
            matched
        } else {
            single
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.bump_if(char::is_whitespace).is_some() {}

            if self.bump_if(|ch| ch == '#').is_none() {
                break;
            }
            while self.bump_if(|ch| ch != '\n').is_some() {}
        }
    }

    fn read_identifier(&mut self, start: usize) -> TokenKind {
        while self
            .bump_if(|ch| Self::is_letter(ch) || ch.is_ascii_digit())
            .is_some()
        {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into()))
    }

    fn read_number(&mut self, start: usize) -> TokenKind {
        while self.bump_if(|ch| ch.is_ascii_digit()).is_some() {}

        // A dot only belongs to the literal when a digit follows it, so that
        // `1.name` still lexes as a member access.
        let mut ahead = self.iter.clone();
        if let (Some((_, '.')), Some((_, digit))) = (ahead.next(), ahead.peek()) {
            if digit.is_ascii_digit() {
                self.bump();
                while self.bump_if(|ch| ch.is_ascii_digit()).is_some() {}
            }
        }

        let end = self.next_idx();
        TokenKind::Number(self.input[start..end].into())
    }

    /// An unclosed literal swallows the rest of the input and is reported as
    /// the illegal opening quote.
    fn read_text(&mut self, start: usize) -> TokenKind {
        loop {
            match self.bump() {
                Some((end, '"')) => return TokenKind::Text(self.input[start + 1..end].into()),
                None => return TokenKind::Illegal("\"".into()),
                _ => {}
            }
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    /// Yields every token up to, but excluding, the end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
