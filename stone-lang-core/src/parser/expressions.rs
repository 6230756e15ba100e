use std::rc::Rc;

use super::error::ParseError;
use super::statements::parse_block;
use crate::ast::{Expression, FunctionLiteral, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Or,
    And,
    Equals,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Or => Precedence::Or,
        TokenKind::And => Precedence::And,
        TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::LessThan
        | TokenKind::LessEqual
        | TokenKind::GreaterThan
        | TokenKind::GreaterEqual => Precedence::Equals,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen | TokenKind::Dot => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Pratt loop: infix operators keep extending `left` while they bind
/// tighter than `precedence`. Equal precedence stops the loop, which makes
/// every binary operator left associative.
pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let token = parser.advance();
    let mut left_expression = prefix_parsing(token, parser)?;

    while precedence < precedence_of(&parser.current.kind) {
        let Some(infix_parse_function) = infix_parsing_function(&parser.current.kind) else {
            break;
        };
        parser.advance();
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn prefix_operation(
    kind: PrefixOperationKind,
) -> impl FnOnce(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(expression)
}

/// Comma separated elements up to and including `terminator`. A trailing
/// comma before the terminator is accepted.
fn parse_sequence<T>(
    parser: &mut Parser,
    parse_element: impl Fn(&mut Parser) -> Result<T, ParseError>,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    loop {
        if parser.current.kind == terminator {
            parser.advance();
            return Ok(elements);
        }
        elements.push(parse_element(parser)?);

        match &parser.current.kind {
            TokenKind::Comma => {
                parser.advance();
            }
            kind if *kind == terminator => {
                parser.advance();
                return Ok(elements);
            }
            _ => return Err(ParseError::unexpected_token(terminator, &parser.current)),
        }
    }
}

fn parse_list_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expressions = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RBracket,
    )?;
    Ok(Expression::ListLiteral(expressions))
}

fn parse_record_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let fields = parse_sequence(
        parser,
        |parser| {
            let key = parser.parse_ident()?;
            parser.expect_token(TokenKind::Assign)?;
            let value = parse_expression(parser, Precedence::Lowest)?;
            Ok((key, value))
        },
        TokenKind::RBrace,
    )?;
    Ok(Expression::RecordLiteral(fields))
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_token(TokenKind::LParen)?;
    let parameters = parse_parameters(parser)?;

    let body = parse_block(parser)?;
    parser.expect_token(TokenKind::End)?;

    Ok(Expression::FunctionLiteral(Rc::new(FunctionLiteral {
        parameters,
        body,
    })))
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    parse_sequence(parser, |parser| parser.parse_ident(), TokenKind::RParen)
}

pub fn prefix_parsing(token: Token, parser: &mut Parser) -> Result<Expression, ParseError> {
    match &token.kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(Identifier { name: name.clone() })),
        TokenKind::Number(val) => match val.parse() {
            Ok(val) => Ok(Expression::NumberLiteral(val)),
            Err(_) => Err(ParseError::InvalidNumber(token.clone())),
        },
        TokenKind::Text(val) => Ok(Expression::TextLiteral(val.clone())),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Nil => Ok(Expression::NilLiteral),
        TokenKind::Not => prefix_operation(PrefixOperationKind::Not)(parser),
        TokenKind::Minus => prefix_operation(PrefixOperationKind::Minus)(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::LBracket => parse_list_literal(parser),
        TokenKind::LBrace => parse_record_literal(parser),
        TokenKind::Function => parse_function_literal(parser),
        TokenKind::Illegal(_) => Err(ParseError::IllegalToken(token.clone())),
        TokenKind::Eof => Err(ParseError::premature_end_expected_expression(token.position)),
        _ => Err(ParseError::NoPrefixFunction(token.clone())),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(precedence: Precedence, kind: InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, precedence)?),
            ))
        },
    )
}

fn parse_call_function(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

fn parse_member_expression(
    left: Expression,
    parser: &mut Parser,
) -> Result<Expression, ParseError> {
    let property = parser.parse_ident()?;

    Ok(Expression::MemberExpression {
        object: Box::new(left),
        property,
    })
}

pub fn infix_parsing_function(token: &TokenKind) -> Option<InfixFunction> {
    use InfixOperationKind as InfixKind;

    let kind = match token {
        TokenKind::LParen => return Some(Box::new(parse_call_function)),
        TokenKind::Dot => return Some(Box::new(parse_member_expression)),
        TokenKind::Plus => InfixKind::Plus,
        TokenKind::Minus => InfixKind::Minus,
        TokenKind::Asterisk => InfixKind::Multiply,
        TokenKind::Slash => InfixKind::Divide,
        TokenKind::LessThan => InfixKind::LessThan,
        TokenKind::LessEqual => InfixKind::LessEqual,
        TokenKind::GreaterThan => InfixKind::GreaterThan,
        TokenKind::GreaterEqual => InfixKind::GreaterEqual,
        TokenKind::Equal => InfixKind::Equal,
        TokenKind::NotEqual => InfixKind::NotEqual,
        TokenKind::And => InfixKind::And,
        TokenKind::Or => InfixKind::Or,
        _ => return None,
    };
    Some(infix_operation(precedence_of(token), kind))
}
