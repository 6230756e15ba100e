use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use gc::Gc;
use stone_lang_core::ast;
use stone_lang_core::ast::{Expression, InfixOperationKind, PrefixOperationKind, Statement};
use tracing::{debug, trace};

use crate::builtins::Builtins;
use crate::environment::Environment;
use crate::object::{EvaluationError, Function, Object, QuickReturn};

#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Folder that `log.info` and `log.error` append to.
    pub log_folder: PathBuf,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            log_folder: PathBuf::from("."),
        }
    }
}

/// Tree walking evaluator. Holds the built-in table, which is built once at
/// construction and never changes afterwards, and the small amount of host
/// state the standard library needs.
pub struct Evaluator {
    builtins: Builtins,
    log_folder: RefCell<PathBuf>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Evaluator {
            builtins: Builtins::new(),
            log_folder: RefCell::new(config.log_folder),
        }
    }

    pub fn log_folder(&self) -> PathBuf {
        self.log_folder.borrow().clone()
    }

    pub fn set_log_folder(&self, folder: PathBuf) {
        debug!(folder = %folder.display(), "log folder changed");
        *self.log_folder.borrow_mut() = folder;
    }

    /// Evaluates every statement of `program` in `environment` and returns
    /// the value of the last one, or the value of a top level `return`.
    pub fn eval_program(
        &self,
        program: &ast::Program,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, EvaluationError> {
        trace!(statements = program.statements.len(), "evaluating program");
        let mut output = Object::nil();
        for statement in &program.statements {
            let result = self.eval_statement(statement, environment);

            match result {
                Ok(object) => output = object,
                Err(QuickReturn::Return(value)) => return Ok(value),
                Err(QuickReturn::Break) => return Err(EvaluationError::BreakOutsideLoop),
                Err(QuickReturn::Continue) => return Err(EvaluationError::ContinueOutsideLoop),
                Err(QuickReturn::Error(error)) => {
                    debug!(%error, "evaluation failed");
                    return Err(error);
                }
            };
        }
        Ok(output)
    }

    /// Calls a user function or a built-in with already evaluated arguments.
    pub fn call(
        &self,
        function: &Gc<Object>,
        arguments: Vec<Gc<Object>>,
    ) -> Result<Gc<Object>, EvaluationError> {
        match &**function {
            Object::Function(function) => self.apply_function(function, arguments),
            Object::Builtin(builtin) => {
                trace!(builtin = builtin.name, arguments = arguments.len(), "calling builtin");
                (builtin.func)(self, arguments)
            }
            other => Err(EvaluationError::CallNonFunction(other.type_name())),
        }
    }

    fn apply_function(
        &self,
        function: &Function,
        arguments: Vec<Gc<Object>>,
    ) -> Result<Gc<Object>, EvaluationError> {
        let parameters = &function.literal.parameters;
        if parameters.len() != arguments.len() {
            return Err(EvaluationError::WrongArgumentCount {
                expected: parameters.len(),
                actual: arguments.len(),
            });
        }
        trace!(arguments = arguments.len(), "calling function");

        let mut new_environment = Environment::new_enclosed(function.env.clone());
        for (parameter, argument) in parameters.iter().zip(arguments) {
            new_environment.set(parameter.name.clone(), argument);
        }
        match self.eval_block_statement(&function.literal.body, &mut new_environment) {
            Ok(object) => Ok(object),
            Err(QuickReturn::Return(value)) => Ok(value),
            Err(QuickReturn::Break) => Err(EvaluationError::BreakOutsideLoop),
            Err(QuickReturn::Continue) => Err(EvaluationError::ContinueOutsideLoop),
            Err(QuickReturn::Error(err)) => Err(err),
        }
    }

    fn eval_statement(
        &self,
        statement: &Statement,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        match statement {
            Statement::Expression(expression) => self.eval_expression(expression, environment),
            Statement::Assign(statement) => {
                let value = self.eval_expression(&statement.value, environment)?;
                environment.set(statement.identifier.name.clone(), value);
                Ok(Object::nil())
            }
            Statement::CompoundAssign(statement) => {
                let current = self.eval_identifier(&statement.identifier, environment)?;
                let value = self.eval_expression(&statement.value, environment)?;
                let value = eval_infix_operation(statement.operation, current, value)?;
                environment.set(statement.identifier.name.clone(), value);
                Ok(Object::nil())
            }
            Statement::If(statement) => self.eval_if_statement(statement, environment),
            Statement::Loop(body) => self.eval_loop_statement(body, environment),
            Statement::For(statement) => self.eval_for_statement(statement, environment),
            Statement::Return(statement) => {
                let value = match &statement.value {
                    Some(value) => self.eval_expression(value, environment)?,
                    None => Object::nil(),
                };
                Err(QuickReturn::Return(value))
            }
            Statement::Break => Err(QuickReturn::Break),
            Statement::Continue => Err(QuickReturn::Continue),
        }
    }

    fn eval_block_statement(
        &self,
        block: &ast::BlockStatement,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        let mut result = Object::nil();
        for statement in &block.statements {
            result = self.eval_statement(statement, environment)?;
        }
        Ok(result)
    }

    fn eval_if_statement(
        &self,
        statement: &ast::IfStatement,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        for branch in &statement.branches {
            let condition = self.eval_expression(&branch.condition, environment)?;
            if condition.is_truthy() {
                return self.eval_block_statement(&branch.consequence, environment);
            }
        }
        match &statement.alternative {
            Some(alternative) => self.eval_block_statement(alternative, environment),
            None => Ok(Object::nil()),
        }
    }

    fn eval_loop_statement(
        &self,
        body: &ast::BlockStatement,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        loop {
            match self.eval_block_statement(body, environment) {
                Ok(_) | Err(QuickReturn::Continue) => continue,
                Err(QuickReturn::Break) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(Object::nil())
    }

    fn eval_for_statement(
        &self,
        statement: &ast::ForStatement,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        let iterable = self.eval_expression(&statement.iterable, environment)?;
        let Object::List(items) = &*iterable else {
            return Err(EvaluationError::NotIterable(iterable.type_name()).into());
        };
        for item in items {
            environment.set(statement.item.name.clone(), item.clone());
            match self.eval_block_statement(&statement.body, environment) {
                Ok(_) | Err(QuickReturn::Continue) => continue,
                Err(QuickReturn::Break) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(Object::nil())
    }

    fn eval_identifier(
        &self,
        identifier: &ast::Identifier,
        environment: &Environment,
    ) -> Result<Gc<Object>, EvaluationError> {
        environment
            .get(&identifier.name)
            .or_else(|| self.builtins.get(&identifier.name))
            .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()))
    }

    fn eval_expression(
        &self,
        expression: &Expression,
        environment: &mut Environment,
    ) -> Result<Gc<Object>, QuickReturn> {
        match expression {
            Expression::NumberLiteral(value) => Ok(Object::number(*value)),
            Expression::TextLiteral(value) => Ok(Object::text(value.clone())),
            Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
            Expression::NilLiteral => Ok(Object::nil()),
            Expression::ListLiteral(list) => {
                Ok(Object::list(self.eval_expressions(list, environment)?))
            }
            Expression::RecordLiteral(fields) => {
                let mut record = HashMap::new();
                for (key, value) in fields {
                    let value = self.eval_expression(value, environment)?;
                    record.insert(key.name.clone(), value);
                }
                Ok(Object::record(record))
            }
            Expression::Identifier(identifier) => {
                Ok(self.eval_identifier(identifier, environment)?)
            }
            Expression::PrefixOperation(kind, right) => {
                let right = self.eval_expression(right, environment)?;
                Ok(eval_prefix_operation(*kind, right)?)
            }
            Expression::InfixOperation(InfixOperationKind::And, left, right) => {
                let left = self.eval_expression(left, environment)?;
                if left.is_truthy() {
                    self.eval_expression(right, environment)
                } else {
                    Ok(left)
                }
            }
            Expression::InfixOperation(InfixOperationKind::Or, left, right) => {
                let left = self.eval_expression(left, environment)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expression(right, environment)
                }
            }
            Expression::InfixOperation(kind, left, right) => {
                let left = self.eval_expression(left, environment)?;
                let right = self.eval_expression(right, environment)?;
                Ok(eval_infix_operation(*kind, left, right)?)
            }
            Expression::FunctionLiteral(literal) => {
                Ok(Object::function(literal.clone(), environment.clone()))
            }
            Expression::CallExpression {
                function,
                arguments,
            } => {
                let function = self.eval_expression(function, environment)?;
                let arguments = self.eval_expressions(arguments, environment)?;
                Ok(self.call(&function, arguments)?)
            }
            Expression::MemberExpression { object, property } => {
                let object = self.eval_expression(object, environment)?;
                match &*object {
                    Object::Record(record) => Ok(record
                        .borrow()
                        .fields
                        .get(&property.name)
                        .cloned()
                        .unwrap_or_else(Object::nil)),
                    other => Err(EvaluationError::PropertyOnNonRecord {
                        property: property.name.clone(),
                        object: other.type_name(),
                    }
                    .into()),
                }
            }
        }
    }

    fn eval_expressions(
        &self,
        expressions: &[Expression],
        environment: &mut Environment,
    ) -> Result<Vec<Gc<Object>>, QuickReturn> {
        let mut result = Vec::with_capacity(expressions.len());
        for expression in expressions {
            result.push(self.eval_expression(expression, environment)?);
        }
        Ok(result)
    }
}

fn eval_prefix_operation(
    kind: PrefixOperationKind,
    right: Gc<Object>,
) -> Result<Gc<Object>, EvaluationError> {
    match (kind, &*right) {
        (PrefixOperationKind::Not, _) => Ok(Object::boolean(!right.is_truthy())),
        (PrefixOperationKind::Minus, Object::Number(value)) => Ok(Object::number(-value)),
        (operation, right) => Err(EvaluationError::UnknownPrefixOperator {
            operation,
            right: right.type_name(),
        }),
    }
}

/// Strict binary operators. `and`/`or` never get here: they are resolved in
/// `eval_expression` before the right operand is evaluated.
fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Gc<Object>,
    right: Gc<Object>,
) -> Result<Gc<Object>, EvaluationError> {
    use InfixOperationKind::*;
    match (kind, &*left, &*right) {
        (Equal, _, _) => Ok(Object::boolean(left == right)),
        (NotEqual, _, _) => Ok(Object::boolean(left != right)),
        (Plus, Object::Number(left), Object::Number(right)) => Ok(Object::number(left + right)),
        (Minus, Object::Number(left), Object::Number(right)) => Ok(Object::number(left - right)),
        (Multiply, Object::Number(left), Object::Number(right)) => {
            Ok(Object::number(left * right))
        }
        (Divide, Object::Number(left), Object::Number(right)) => Ok(Object::number(left / right)),
        (LessThan, Object::Number(left), Object::Number(right)) => {
            Ok(Object::boolean(left < right))
        }
        (LessEqual, Object::Number(left), Object::Number(right)) => {
            Ok(Object::boolean(left <= right))
        }
        (GreaterThan, Object::Number(left), Object::Number(right)) => {
            Ok(Object::boolean(left > right))
        }
        (GreaterEqual, Object::Number(left), Object::Number(right)) => {
            Ok(Object::boolean(left >= right))
        }
        (Plus, Object::Text(left), Object::Text(right)) => {
            Ok(Object::text(format!("{}{}", left, right)))
        }
        (operation, left, right) if left.type_name() != right.type_name() => {
            Err(EvaluationError::TypeMismatch {
                left: left.type_name(),
                operation,
                right: right.type_name(),
            })
        }
        (operation, left, right) => Err(EvaluationError::UnsupportedOperator {
            left: left.type_name(),
            operation,
            right: right.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use gc::Gc;
    use stone_lang_core::ast::{InfixOperationKind, PrefixOperationKind};
    use stone_lang_core::lexer::Tokenizer;
    use stone_lang_core::parser::Parser;

    use super::{Evaluator, EvaluatorConfig};
    use crate::environment::Environment;
    use crate::object::{EvaluationError, Object};

    fn run(input: &str, environment: &mut Environment) -> Result<Gc<Object>, EvaluationError> {
        let tokenizer = Tokenizer::new(input);
        let mut parser = Parser::new(tokenizer);
        let ast = parser.parse_program().unwrap();
        Evaluator::new(EvaluatorConfig::default()).eval_program(&ast, environment)
    }

    fn test_evaluation(inputs: Vec<(&str, Result<Gc<Object>, EvaluationError>)>) {
        for (input, output) in inputs {
            let result = run(input, &mut Environment::new());

            assert_eq!(result, output, "input: {}", input);
        }
    }

    fn record(fields: Vec<(&str, Gc<Object>)>) -> Gc<Object> {
        Object::record(
            fields
                .into_iter()
                .map(|(key, value)| (Rc::from(key), value))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_literal() {
        let inputs = vec![
            ("5", Ok(Object::number(5.0))),
            ("10.25", Ok(Object::number(10.25))),
            ("true", Ok(Object::boolean(true))),
            ("false", Ok(Object::boolean(false))),
            ("\"hello\"", Ok(Object::text("hello"))),
            ("nil", Ok(Object::nil())),
            ("", Ok(Object::nil())),
            (
                "[1, \"a\", [true]]",
                Ok(Object::list(vec![
                    Object::number(1.0),
                    Object::text("a"),
                    Object::list(vec![Object::boolean(true)]),
                ])),
            ),
            (
                "{ a = 1, b = \"x\" }",
                Ok(record(vec![
                    ("a", Object::number(1.0)),
                    ("b", Object::text("x")),
                ])),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_prefix_and_arithmetic() {
        let inputs = vec![
            ("--5", Ok(Object::number(5.0))),
            ("-10", Ok(Object::number(-10.0))),
            ("not false", Ok(Object::boolean(true))),
            ("not not true", Ok(Object::boolean(true))),
            ("not nil", Ok(Object::boolean(true))),
            ("not 0", Ok(Object::boolean(false))),
            ("2 + 5 * 10", Ok(Object::number(52.0))),
            ("(2 + 5) * 10", Ok(Object::number(70.0))),
            ("10 / 4", Ok(Object::number(2.5))),
            ("1 / 0", Ok(Object::number(f64::INFINITY))),
            ("123 - - - 5", Ok(Object::number(118.0))),
            ("3 < 4", Ok(Object::boolean(true))),
            ("3 <= 3", Ok(Object::boolean(true))),
            ("3 > 4", Ok(Object::boolean(false))),
            ("4 >= 5", Ok(Object::boolean(false))),
            ("\"foo\" + \"bar\"", Ok(Object::text("foobar"))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_equality() {
        let inputs = vec![
            ("[1,2,3] == [1,2,3]", Ok(Object::boolean(true))),
            ("[1,2,3] == [1,2]", Ok(Object::boolean(false))),
            ("{a = [1]} == {a = [1]}", Ok(Object::boolean(true))),
            ("1 == \"1\"", Ok(Object::boolean(false))),
            ("1 != \"1\"", Ok(Object::boolean(true))),
            ("nil == nil", Ok(Object::boolean(true))),
            ("nil == false", Ok(Object::boolean(false))),
            ("\"a\" == \"a\"", Ok(Object::boolean(true))),
            ("f = func() end f == f", Ok(Object::boolean(false))),
            ("f = func() end f != f", Ok(Object::boolean(true))),
            ("print == print", Ok(Object::boolean(false))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_errors() {
        let inputs = vec![
            (
                "1 + \"a\"",
                Err(EvaluationError::TypeMismatch {
                    left: "number",
                    operation: InfixOperationKind::Plus,
                    right: "text",
                }),
            ),
            (
                "\"a\" - \"b\"",
                Err(EvaluationError::UnsupportedOperator {
                    left: "text",
                    operation: InfixOperationKind::Minus,
                    right: "text",
                }),
            ),
            (
                "true < false",
                Err(EvaluationError::UnsupportedOperator {
                    left: "boolean",
                    operation: InfixOperationKind::LessThan,
                    right: "boolean",
                }),
            ),
            (
                "-\"a\"",
                Err(EvaluationError::UnknownPrefixOperator {
                    operation: PrefixOperationKind::Minus,
                    right: "text",
                }),
            ),
            ("missing", Err(EvaluationError::UnknownIdentifier("missing".into()))),
            ("5(1)", Err(EvaluationError::CallNonFunction("number"))),
            (
                "f = func(a, b) return a end f(1)",
                Err(EvaluationError::WrongArgumentCount {
                    expected: 2,
                    actual: 1,
                }),
            ),
            (
                "x = 1 x.y",
                Err(EvaluationError::PropertyOnNonRecord {
                    property: "y".into(),
                    object: "number",
                }),
            ),
            ("for x in 5 do end", Err(EvaluationError::NotIterable("number"))),
            ("break", Err(EvaluationError::BreakOutsideLoop)),
            (
                "f = func() continue end loop f() end",
                Err(EvaluationError::ContinueOutsideLoop),
            ),
            (
                "a = 1 + \"a\" a",
                Err(EvaluationError::TypeMismatch {
                    left: "number",
                    operation: InfixOperationKind::Plus,
                    right: "text",
                }),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_error_message_names_types() {
        let error = run("1 + \"a\"", &mut Environment::new()).unwrap_err();
        let message = error.to_string();

        assert!(message.contains("number"), "{}", message);
        assert!(message.contains("text"), "{}", message);
    }

    #[test]
    fn test_assignment() {
        let inputs = vec![
            ("a = 2 + 5 * 10 a", Ok(Object::number(52.0))),
            ("a = 5", Ok(Object::nil())),
            ("a = 5 b = a a = 6 b", Ok(Object::number(5.0))),
            ("a = 5 a += 2 a", Ok(Object::number(7.0))),
            ("a = 5 a -= 2 a", Ok(Object::number(3.0))),
            ("a = 5 a *= 2 a", Ok(Object::number(10.0))),
            ("a = 5 a /= 2 a", Ok(Object::number(2.5))),
            ("s = \"ab\" s += \"c\" s", Ok(Object::text("abc"))),
            ("b += 1", Err(EvaluationError::UnknownIdentifier("b".into()))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_if_statement() {
        let inputs = vec![
            ("if 1 > 2 then a = 1 else a = 2 end a", Ok(Object::number(2.0))),
            ("if true then 10 end", Ok(Object::number(10.0))),
            ("if false then 10 end", Ok(Object::nil())),
            ("if nil then 1 else 2 end", Ok(Object::number(2.0))),
            ("if 0 then 1 else 2 end", Ok(Object::number(1.0))),
            (
                "x = 5 if x < 3 then r = 1 elseif x < 6 then r = 2 elseif x < 9 then r = 3 else r = 4 end r",
                Ok(Object::number(2.0)),
            ),
            (
                "x = 10 if x < 3 then r = 1 elseif x < 6 then r = 2 else r = 4 end r",
                Ok(Object::number(4.0)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_logical_operators() {
        let inputs = vec![
            ("true and 5", Ok(Object::number(5.0))),
            ("nil and 5", Ok(Object::nil())),
            ("false or \"x\"", Ok(Object::text("x"))),
            ("1 or 2", Ok(Object::number(1.0))),
            // the right operand is not evaluated when the left decides
            ("false and missing()", Ok(Object::boolean(false))),
            ("true or missing()", Ok(Object::boolean(true))),
            (
                "true and missing()",
                Err(EvaluationError::UnknownIdentifier("missing".into())),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_short_circuit_skips_side_effects() {
        let input = "
        counter = { calls = 0 }
        bump = func()
            record.set(counter, \"calls\", counter.calls + 1)
            return true
        end
        r = false and bump()
        r = true or bump()
        r = nil and bump()
        r = true and bump()
        counter.calls
        ";
        let result = run(input, &mut Environment::new());

        assert_eq!(result, Ok(Object::number(1.0)));
    }

    #[test]
    fn test_loops() {
        let inputs = vec![
            (
                "i = 0 loop i += 1 if i >= 10 then break end end i",
                Ok(Object::number(10.0)),
            ),
            (
                "i = 0 n = 0 loop i += 1 if i > 10 then break end if i > 5 then continue end n += 1 end n",
                Ok(Object::number(5.0)),
            ),
            (
                "sum = 0 for x in [1, 2, 3, 4] do sum += x end sum",
                Ok(Object::number(10.0)),
            ),
            (
                "sum = 0 for x in [1, 2, 3, 4] do if x == 2 then continue end if x == 4 then break end sum += x end sum",
                Ok(Object::number(4.0)),
            ),
            ("for x in [] do end", Ok(Object::nil())),
            ("for x in [1, 2] do end x", Ok(Object::number(2.0))),
            (
                "f = func() loop return 7 end end f()",
                Ok(Object::number(7.0)),
            ),
            (
                "n = 0 for row in [[1, 2], [3]] do for x in row do if x == 2 then break end n += x end end n",
                Ok(Object::number(4.0)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_return() {
        let inputs = vec![
            ("return 10 9", Ok(Object::number(10.0))),
            ("return", Ok(Object::nil())),
            ("if true then if true then return 10 end return 1 end", Ok(Object::number(10.0))),
            ("f = func() return end f()", Ok(Object::nil())),
            ("f = func() 4 end f()", Ok(Object::number(4.0))),
            ("f = func() end f()", Ok(Object::nil())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_application() {
        let inputs = vec![
            ("f = func(x) return x + 1 end f(4)", Ok(Object::number(5.0))),
            ("identity = func(x) return x end identity(5)", Ok(Object::number(5.0))),
            ("add = func(x, y) return x + y end add(5 + 5, add(5, 5))", Ok(Object::number(20.0))),
            ("func(x) return x end(5)", Ok(Object::number(5.0))),
            (
                "
                factorial = func(n)
                    if n < 2 then return 1 end
                    return factorial(n - 1) * n
                end
                factorial(5)",
                Ok(Object::number(120.0)),
            ),
            (
                "
                adder = func(a)
                    return func(b) return a + b end
                end
                adder(5)(10)",
                Ok(Object::number(15.0)),
            ),
            ("r = { f = func(x) return x * 2 end } r.f(4)", Ok(Object::number(8.0))),
            ("r = { a = { b = 3 } } r.a.b", Ok(Object::number(3.0))),
            ("r = { a = 1 } r.missing", Ok(Object::nil())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_scope_isolation() {
        let inputs = vec![
            ("x = 1 f = func() x = 2 return x end f() x", Ok(Object::number(1.0))),
            ("x = 1 f = func() x = 2 return x end f()", Ok(Object::number(2.0))),
            ("x = 1 f = func(x) return x end f(3) x", Ok(Object::number(1.0))),
            ("f = func() y = 2 end f() y", Err(EvaluationError::UnknownIdentifier("y".into()))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_closures_share_the_environment() {
        let inputs = vec![
            (
                "
                x = 1
                get = func() return x end
                x = 2
                get()",
                Ok(Object::number(2.0)),
            ),
            (
                "
                make = func()
                    count = 0
                    return {
                        inc = func() count += 1 return count end,
                        peek = func() return count end,
                    }
                end
                c = make()
                c.inc()
                c.inc()
                c.peek()",
                // `count += 1` binds in the call scope of `inc`, so the
                // captured binding in `make` stays untouched.
                Ok(Object::number(0.0)),
            ),
            (
                "
                fa = func()
                    x = 5
                    fb = func() return func() return x end end
                    return fb
                end
                fa()()()",
                Ok(Object::number(5.0)),
            ),
            (
                "
                fa = func()
                    is_even = func(x) if x == 0 then return true end return is_odd(x - 1) end
                    is_odd = func(x) if x == 0 then return false end return is_even(x - 1) end
                    return is_even
                end
                fa()(3)",
                Ok(Object::boolean(false)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_environment_is_reused_between_programs() {
        let mut environment = Environment::new();
        run("a = 40", &mut environment).unwrap();
        let result = run("a + 2", &mut environment);

        assert_eq!(result, Ok(Object::number(42.0)));
        assert_eq!(environment.len(), 1);
    }

    #[test]
    fn test_builtins_resolve_after_environment() {
        let inputs = vec![
            ("len([1, 2])", Ok(Object::number(2.0))),
            ("len = func(x) return 0 end len([1, 2])", Ok(Object::number(0.0))),
            (
                "list.map([1, 2], func(x) return x * 10 end)",
                Ok(Object::list(vec![
                    Object::number(10.0),
                    Object::number(20.0),
                ])),
            ),
        ];

        test_evaluation(inputs);
    }
}
