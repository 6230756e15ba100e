use std::fmt::{Display, Formatter, Result as FmtResult};
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assign(AssignStatement),
    CompoundAssign(CompoundAssignStatement),
    If(IfStatement),
    Loop(BlockStatement),
    For(ForStatement),
    Return(ReturnStatement),
    Break,
    Continue,
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct AssignStatement {
    pub identifier: Identifier,
    pub value: Expression,
}

/// `a += b` and friends. `operation` is the arithmetic applied to the current
/// binding and `value`.
#[derive(Debug, PartialEq, Clone)]
pub struct CompoundAssignStatement {
    pub identifier: Identifier,
    pub operation: InfixOperationKind,
    pub value: Expression,
}

/// An `if ... elseif ... else ... end` chain. `branches` holds the `if`
/// condition first, followed by every `elseif` in source order.
#[derive(Debug, PartialEq, Clone)]
pub struct IfStatement {
    pub branches: Vec<ConditionalBlock>,
    pub alternative: Option<BlockStatement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ConditionalBlock {
    pub condition: Expression,
    pub consequence: BlockStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ForStatement {
    pub item: Identifier,
    pub iterable: Expression,
    pub body: BlockStatement,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    NumberLiteral(f64),
    TextLiteral(Rc<str>),
    BooleanLiteral(bool),
    NilLiteral,
    ListLiteral(Vec<Expression>),
    RecordLiteral(Vec<(Identifier, Expression)>),
    FunctionLiteral(Rc<FunctionLiteral>),
    PrefixOperation(PrefixOperationKind, Box<Expression>),
    InfixOperation(InfixOperationKind, Box<Expression>, Box<Expression>),
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    MemberExpression {
        object: Box<Expression>,
        property: Identifier,
    },
}

/// Shared between the tree and every closure created from it; neither side
/// mutates it.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InfixOperationKind {
    Plus,
    Minus,
    Multiply,
    Divide,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PrefixOperationKind {
    Minus,
    Not,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl PrefixOperationKind {
    pub fn to_str(&self) -> &'static str {
        use PrefixOperationKind::*;
        match self {
            Minus => "-",
            Not => "not",
        }
    }
}

impl InfixOperationKind {
    pub fn to_str(&self) -> &'static str {
        use InfixOperationKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            LessThan => "<",
            LessEqual => "<=",
            GreaterThan => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        }
    }
}

impl InfixOperationKind {
    /// Binding strength, higher binds tighter. Matches the parser's table.
    pub fn binding_power(&self) -> u8 {
        use InfixOperationKind::*;
        match self {
            Or => 1,
            And => 2,
            LessThan | LessEqual | GreaterThan | GreaterEqual | Equal | NotEqual => 3,
            Plus | Minus => 4,
            Multiply | Divide => 5,
        }
    }
}

impl Display for PrefixOperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

impl Display for InfixOperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

// The printed form is valid source: parsing it again yields the same tree.
// Nested blocks are indented with one tab per level.

fn indent(f: &mut Formatter<'_>, depth: usize) -> FmtResult {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

fn write_block(f: &mut Formatter<'_>, block: &BlockStatement, depth: usize) -> FmtResult {
    for statement in &block.statements {
        indent(f, depth)?;
        write_statement(f, statement, depth)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_statement(f: &mut Formatter<'_>, statement: &Statement, depth: usize) -> FmtResult {
    use Statement::*;
    match statement {
        Assign(assign) => {
            write!(f, "{} = ", assign.identifier.name)?;
            write_root_expression(f, &assign.value, depth)
        }
        CompoundAssign(assign) => {
            write!(f, "{} {}= ", assign.identifier.name, assign.operation)?;
            write_root_expression(f, &assign.value, depth)
        }
        If(statement) => {
            for (i, branch) in statement.branches.iter().enumerate() {
                if i > 0 {
                    indent(f, depth)?;
                    f.write_str("elseif ")?;
                } else {
                    f.write_str("if ")?;
                }
                write_expression(f, &branch.condition, depth)?;
                writeln!(f, " then")?;
                write_block(f, &branch.consequence, depth + 1)?;
            }
            if let Some(alternative) = &statement.alternative {
                indent(f, depth)?;
                writeln!(f, "else")?;
                write_block(f, alternative, depth + 1)?;
            }
            indent(f, depth)?;
            f.write_str("end")
        }
        Loop(body) => {
            writeln!(f, "loop")?;
            write_block(f, body, depth + 1)?;
            indent(f, depth)?;
            f.write_str("end")
        }
        For(statement) => {
            write!(f, "for {} in ", statement.item.name)?;
            write_expression(f, &statement.iterable, depth)?;
            writeln!(f, " do")?;
            write_block(f, &statement.body, depth + 1)?;
            indent(f, depth)?;
            f.write_str("end")
        }
        Return(ReturnStatement { value: None }) => f.write_str("return"),
        Return(ReturnStatement { value: Some(value) }) => {
            f.write_str("return ")?;
            write_root_expression(f, value, depth)
        }
        Break => f.write_str("break"),
        Continue => f.write_str("continue"),
        Expression(expression) => write_root_expression(f, expression, depth),
    }
}

/// Statements are not separated by any token, so a statement that opens with
/// `(` would continue the previous one as a call. At statement level the
/// infix parentheses along the left edge are left out wherever precedence
/// and left associativity make them redundant.
fn write_root_expression(
    f: &mut Formatter<'_>,
    expression: &Expression,
    depth: usize,
) -> FmtResult {
    let Expression::InfixOperation(kind, left, right) = expression else {
        return write_expression(f, expression, depth);
    };
    match &**left {
        Expression::InfixOperation(inner, ..) if inner.binding_power() >= kind.binding_power() => {
            write_root_expression(f, left, depth)?
        }
        _ => write_expression(f, left, depth)?,
    }
    write!(f, " {} ", kind)?;
    write_expression(f, right, depth)
}

fn write_list(f: &mut Formatter<'_>, expressions: &[Expression], depth: usize) -> FmtResult {
    for (i, expression) in expressions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_expression(f, expression, depth)?;
    }
    Ok(())
}

/// Callees and member targets that start with a prefix operator need
/// parentheses, otherwise the operator would bind to the whole suffix chain.
fn write_postfix_target(f: &mut Formatter<'_>, target: &Expression, depth: usize) -> FmtResult {
    if let Expression::PrefixOperation(..) = target {
        f.write_str("(")?;
        write_expression(f, target, depth)?;
        f.write_str(")")
    } else {
        write_expression(f, target, depth)
    }
}

fn write_expression(f: &mut Formatter<'_>, expression: &Expression, depth: usize) -> FmtResult {
    use Expression::*;
    match expression {
        Identifier(ident) => f.write_str(&ident.name),
        NumberLiteral(val) => write!(f, "{}", val),
        TextLiteral(val) => write!(f, "\"{}\"", val),
        BooleanLiteral(val) => write!(f, "{}", val),
        NilLiteral => f.write_str("nil"),
        ListLiteral(list) => {
            f.write_str("[")?;
            write_list(f, list, depth)?;
            f.write_str("]")
        }
        RecordLiteral(fields) => {
            f.write_str("{")?;
            for (i, (key, value)) in fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} = ", key.name)?;
                write_expression(f, value, depth)?;
            }
            f.write_str("}")
        }
        FunctionLiteral(function) => {
            let parameters = function
                .parameters
                .iter()
                .map(|id| id.name.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            writeln!(f, "func ({})", parameters)?;
            write_block(f, &function.body, depth + 1)?;
            indent(f, depth)?;
            f.write_str("end")
        }
        PrefixOperation(PrefixOperationKind::Not, right) => {
            f.write_str("not ")?;
            write_expression(f, right, depth)
        }
        PrefixOperation(kind, right) => {
            f.write_str(kind.to_str())?;
            write_expression(f, right, depth)
        }
        InfixOperation(kind, left, right) => {
            f.write_str("(")?;
            write_expression(f, left, depth)?;
            write!(f, " {} ", kind)?;
            write_expression(f, right, depth)?;
            f.write_str(")")
        }
        CallExpression {
            function,
            arguments,
        } => {
            write_postfix_target(f, function, depth)?;
            f.write_str("(")?;
            write_list(f, arguments, depth)?;
            f.write_str(")")
        }
        MemberExpression { object, property } => {
            write_postfix_target(f, object, depth)?;
            write!(f, ".{}", property.name)
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_expression(f, self, 0)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_statement(f, self, 0)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_block(f, self, 0)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
