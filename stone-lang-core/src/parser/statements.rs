use crate::ast::{
    AssignStatement, BlockStatement, CompoundAssignStatement, ConditionalBlock, ForStatement,
    InfixOperationKind, IfStatement, ReturnStatement, Statement,
};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current.kind {
        TokenKind::If => Ok(Statement::If(parse_if_statement(parser)?)),
        TokenKind::Loop => Ok(Statement::Loop(parse_loop_statement(parser)?)),
        TokenKind::For => Ok(Statement::For(parse_for_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        TokenKind::Break => {
            parser.advance();
            Ok(Statement::Break)
        }
        TokenKind::Continue => {
            parser.advance();
            Ok(Statement::Continue)
        }
        TokenKind::Ident(_) if parser.peek.kind == TokenKind::Assign => {
            Ok(Statement::Assign(parse_assign_statement(parser)?))
        }
        TokenKind::Ident(_) if compound_operation(&parser.peek.kind).is_some() => Ok(
            Statement::CompoundAssign(parse_compound_assign_statement(parser)?),
        ),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

pub(crate) fn compound_operation(token: &TokenKind) -> Option<InfixOperationKind> {
    match token {
        TokenKind::PlusAssign => Some(InfixOperationKind::Plus),
        TokenKind::MinusAssign => Some(InfixOperationKind::Minus),
        TokenKind::AsteriskAssign => Some(InfixOperationKind::Multiply),
        TokenKind::SlashAssign => Some(InfixOperationKind::Divide),
        _ => None,
    }
}

fn ends_block(token: &TokenKind) -> bool {
    matches!(
        token,
        TokenKind::End | TokenKind::Else | TokenKind::Elseif | TokenKind::Eof
    )
}

/// Statements up to, but not including, the `end`, `else` or `elseif` that
/// closes the block. The caller consumes the closing keyword.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    while !ends_block(&parser.current.kind) {
        statements.push(parse_statement(parser)?);
    }
    Ok(BlockStatement { statements })
}

fn parse_assign_statement(parser: &mut Parser) -> Result<AssignStatement, ParseError> {
    let identifier = parser.parse_ident()?;
    parser.expect_token(TokenKind::Assign)?;
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(AssignStatement { identifier, value })
}

fn parse_compound_assign_statement(
    parser: &mut Parser,
) -> Result<CompoundAssignStatement, ParseError> {
    let identifier = parser.parse_ident()?;
    let operator = parser.advance();
    let Some(operation) = compound_operation(&operator.kind) else {
        return Err(ParseError::unexpected_token(TokenKind::PlusAssign, &operator));
    };
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(CompoundAssignStatement {
        identifier,
        operation,
        value,
    })
}

fn parse_conditional_block(parser: &mut Parser) -> Result<ConditionalBlock, ParseError> {
    let condition = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::Then)?;
    let consequence = parse_block(parser)?;

    Ok(ConditionalBlock {
        condition,
        consequence,
    })
}

fn parse_if_statement(parser: &mut Parser) -> Result<IfStatement, ParseError> {
    parser.expect_token(TokenKind::If)?;
    let mut branches = vec![parse_conditional_block(parser)?];

    while parser.current.kind == TokenKind::Elseif {
        parser.advance();
        branches.push(parse_conditional_block(parser)?);
    }

    let alternative = if parser.current.kind == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };
    parser.expect_token(TokenKind::End)?;

    Ok(IfStatement {
        branches,
        alternative,
    })
}

fn parse_loop_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    parser.expect_token(TokenKind::Loop)?;
    let body = parse_block(parser)?;
    parser.expect_token(TokenKind::End)?;

    Ok(body)
}

fn parse_for_statement(parser: &mut Parser) -> Result<ForStatement, ParseError> {
    parser.expect_token(TokenKind::For)?;
    let item = parser.parse_ident()?;
    parser.expect_token(TokenKind::In)?;
    let iterable = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::Do)?;
    let body = parse_block(parser)?;
    parser.expect_token(TokenKind::End)?;

    Ok(ForStatement {
        item,
        iterable,
        body,
    })
}

/// `return` on its own, directly before the end of a block, yields nil.
fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.expect_token(TokenKind::Return)?;
    if ends_block(&parser.current.kind) {
        return Ok(ReturnStatement { value: None });
    }
    let value = parse_expression(parser, Precedence::Lowest)?;

    Ok(ReturnStatement { value: Some(value) })
}

fn parse_expression_statement(parser: &mut Parser) -> Result<crate::ast::Expression, ParseError> {
    parse_expression(parser, Precedence::Lowest)
}
