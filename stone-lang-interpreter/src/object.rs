use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

use gc::{Finalize, Gc, GcCell, Trace};
use stone_lang_core::ast;
use thiserror::Error;

use crate::environment::Environment;
use crate::evaluator::Evaluator;

#[derive(Trace, Finalize)]
pub enum Object {
    Number(f64),
    Text(Rc<str>),
    Boolean(bool),
    Nil,
    List(Vec<Gc<Object>>),
    Record(GcCell<Record>),
    Function(Function),
    Builtin(Builtin),
}

impl Object {
    pub fn nil() -> Gc<Object> {
        Gc::new(Object::Nil)
    }
    pub fn boolean(value: bool) -> Gc<Object> {
        Gc::new(Object::Boolean(value))
    }
    pub fn number(value: f64) -> Gc<Object> {
        Gc::new(Object::Number(value))
    }
    pub fn text(value: impl Into<Rc<str>>) -> Gc<Object> {
        Gc::new(Object::Text(value.into()))
    }
    pub fn list(list: Vec<Gc<Object>>) -> Gc<Object> {
        Gc::new(Object::List(list))
    }
    pub fn record(fields: HashMap<Rc<str>, Gc<Object>>) -> Gc<Object> {
        Gc::new(Object::Record(GcCell::new(Record {
            stoned: false,
            fields,
        })))
    }
    pub fn stoned_record(fields: HashMap<Rc<str>, Gc<Object>>) -> Gc<Object> {
        Gc::new(Object::Record(GcCell::new(Record {
            stoned: true,
            fields,
        })))
    }
    pub fn function(literal: Rc<ast::FunctionLiteral>, env: Environment) -> Gc<Object> {
        Gc::new(Object::Function(Function { literal, env }))
    }
    pub fn builtin(name: &'static str, func: BuiltinFn) -> Gc<Object> {
        Gc::new(Object::Builtin(Builtin { name, func }))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Number(_) => "number",
            Object::Text(_) => "text",
            Object::Boolean(_) => "boolean",
            Object::Nil => "nil",
            Object::List(_) => "list",
            Object::Record(_) => "record",
            Object::Function(_) | Object::Builtin(_) => "function",
        }
    }

    /// `nil` and `false` are falsy, every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Nil => false,
            Object::Boolean(value) => *value,
            _ => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Object::Function(_) | Object::Builtin(_))
    }
}

/// Language level equality: values of different types are never equal and
/// functions are not equal to anything, themselves included.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Number(left), Object::Number(right)) => left == right,
            (Object::Text(left), Object::Text(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Nil, Object::Nil) => true,
            (Object::List(left), Object::List(right)) => left == right,
            (Object::Record(left), Object::Record(right)) => {
                let left = left.borrow();
                let right = right.borrow();
                left.fields.len() == right.fields.len()
                    && left
                        .fields
                        .iter()
                        .all(|(key, value)| right.fields.get(key) == Some(value))
            }
            _ => false,
        }
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Object::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Object::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Object::Nil => f.write_str("Nil"),
            Object::List(list) => f.debug_tuple("List").field(list).finish(),
            Object::Record(record) => f.debug_tuple("Record").field(&*record.borrow()).finish(),
            Object::Function(function) => function.fmt(f),
            Object::Builtin(builtin) => builtin.fmt(f),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Number(value) => write!(f, "{}", value),
            Object::Text(value) => f.write_str(value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Nil => f.write_str("nil"),
            Object::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Object::Record(record) => {
                let record = record.borrow();
                f.write_str("{")?;
                for (i, (key, value)) in record.sorted_fields().into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                f.write_str("}")
            }
            Object::Function(function) => {
                let parameters = function
                    .literal
                    .parameters
                    .iter()
                    .map(|id| id.name.as_ref())
                    .collect::<Vec<&str>>()
                    .join(", ");
                write!(f, "func ({})", parameters)
            }
            Object::Builtin(builtin) => write!(f, "builtin {}", builtin.name),
        }
    }
}

#[derive(Debug, Default, Trace, Finalize)]
/// Records never contain themselves, see `record.set`.
pub struct Record {
    /// A stoned record rejects new keys and updates; the values it already
    /// holds are not frozen.
    pub stoned: bool,
    pub fields: HashMap<Rc<str>, Gc<Object>>,
}

impl Record {
    pub fn sorted_fields(&self) -> Vec<(&Rc<str>, &Gc<Object>)> {
        let mut fields = self.fields.iter().collect::<Vec<_>>();
        fields.sort_by(|(left, _), (right, _)| left.cmp(right));
        fields
    }
}

#[derive(Trace, Finalize)]
pub struct Function {
    #[unsafe_ignore_trace]
    pub literal: Rc<ast::FunctionLiteral>,
    pub env: Environment,
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.literal.parameters)
            .finish_non_exhaustive()
    }
}

pub type BuiltinFn = fn(&Evaluator, Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError>;

#[derive(Trace, Finalize)]
pub struct Builtin {
    #[unsafe_ignore_trace]
    pub name: &'static str,
    #[unsafe_ignore_trace]
    pub func: BuiltinFn,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// Non-local exits from a statement. Carried in the `Err` arm so that `?`
/// unwinds the evaluation until the node that handles the signal.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Gc<Object>),
    Break,
    Continue,
    Error(EvaluationError),
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("could not find identifier `{0}`")]
    UnknownIdentifier(Rc<str>),
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: &'static str,
        operation: ast::InfixOperationKind,
        right: &'static str,
    },
    #[error("bad operator for type: {left} {operation} {right}")]
    UnsupportedOperator {
        left: &'static str,
        operation: ast::InfixOperationKind,
        right: &'static str,
    },
    #[error("invalid operator `{operation}` for type {right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: &'static str,
    },
    #[error("wrong number of arguments: expected {expected}, got {actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("cannot call type {0} as a function")]
    CallNonFunction(&'static str),
    #[error("cannot read property `{property}` of type {object}")]
    PropertyOnNonRecord {
        property: Rc<str>,
        object: &'static str,
    },
    #[error("cannot iterate over type {0}")]
    NotIterable(&'static str),
    #[error("`break` used outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` used outside of a loop")]
    ContinueOutsideLoop,
    #[error("{0}")]
    Builtin(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::Object;
    use stone_lang_core::ast::{BlockStatement, FunctionLiteral, Identifier};

    use crate::environment::Environment;

    fn function(parameters: &[&str]) -> gc::Gc<Object> {
        let literal = FunctionLiteral {
            parameters: parameters
                .iter()
                .map(|name| Identifier {
                    name: Rc::from(*name),
                })
                .collect(),
            body: BlockStatement::default(),
        };
        Object::function(Rc::new(literal), Environment::new())
    }

    #[test]
    fn test_display() {
        let mut fields = HashMap::new();
        fields.insert(Rc::from("b"), Object::text("two"));
        fields.insert(Rc::from("a"), Object::number(1.0));

        let tests = vec![
            (Object::number(52.0), "52"),
            (Object::number(10.5), "10.5"),
            (Object::number(-0.25), "-0.25"),
            (Object::number(1e21), "1000000000000000000000"),
            (Object::text("héllo"), "héllo"),
            (Object::boolean(true), "true"),
            (Object::nil(), "nil"),
            (
                Object::list(vec![Object::number(1.0), Object::text("x"), Object::nil()]),
                "[1, x, nil]",
            ),
            (Object::list(vec![]), "[]"),
            (Object::record(fields), "{a = 1, b = two}"),
            (Object::record(HashMap::new()), "{}"),
            (function(&["a", "b"]), "func (a, b)"),
            (function(&[]), "func ()"),
        ];

        for (object, expected) in tests {
            assert_eq!(object.to_string(), expected);
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(!Object::nil().is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(Object::number(0.0).is_truthy());
        assert!(Object::text("").is_truthy());
        assert!(Object::list(vec![]).is_truthy());
        assert!(function(&[]).is_truthy());
    }

    #[test]
    fn test_equality() {
        let list = || Object::list(vec![Object::number(1.0), Object::number(2.0)]);
        assert_eq!(list(), list());
        assert_ne!(list(), Object::list(vec![Object::number(1.0)]));
        assert_ne!(Object::number(1.0), Object::text("1"));
        assert_eq!(Object::nil(), Object::nil());
        assert_ne!(Object::nil(), Object::boolean(false));

        let f = function(&["x"]);
        assert_ne!(f, f.clone());

        let record = |value: f64| {
            let mut fields = HashMap::new();
            fields.insert(Rc::from("k"), Object::number(value));
            Object::record(fields)
        };
        assert_eq!(record(1.0), record(1.0));
        assert_ne!(record(1.0), record(2.0));
        assert_ne!(record(1.0), Object::record(HashMap::new()));
    }
}
