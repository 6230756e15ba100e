mod conv;
mod env;
mod fs;
mod http;
mod json;
mod list;
mod log;
mod math;
mod path;
mod record;
mod string;
mod time;

use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use gc::{Gc, GcCell};

use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object, Record};

/// Name -> value table consulted when an identifier is not bound in the
/// environment chain. Namespaces are stoned records of built-in functions.
pub struct Builtins {
    table: HashMap<&'static str, Gc<Object>>,
}

impl Builtins {
    pub fn new() -> Self {
        let mut table = HashMap::new();
        table.insert("print", Object::builtin("print", builtin_print));
        table.insert("len", Object::builtin("len", builtin_len));

        let namespaces: [(&'static str, &[(&'static str, BuiltinFn)]); 12] = [
            ("conv", conv::MEMBERS),
            ("env", env::MEMBERS),
            ("fs", fs::MEMBERS),
            ("http", http::MEMBERS),
            ("json", json::MEMBERS),
            ("list", list::MEMBERS),
            ("log", log::MEMBERS),
            ("math", math::MEMBERS),
            ("path", path::MEMBERS),
            ("record", record::MEMBERS),
            ("string", string::MEMBERS),
            ("time", time::MEMBERS),
        ];
        for (name, members) in namespaces {
            table.insert(name, namespace(members));
        }

        Builtins { table }
    }

    pub fn get(&self, name: &str) -> Option<Gc<Object>> {
        self.table.get(name).cloned()
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

/// Members are registered under their qualified name (`list.map`) and
/// stored in the record under the part after the dot.
fn namespace(members: &[(&'static str, BuiltinFn)]) -> Gc<Object> {
    let fields = members
        .iter()
        .map(|&(name, func)| {
            let key = name.split_once('.').map_or(name, |(_, member)| member);
            (Rc::from(key), Object::builtin(name, func))
        })
        .collect();
    Object::stoned_record(fields)
}

pub(crate) fn builtin_error(name: &str, message: impl Display) -> EvaluationError {
    EvaluationError::Builtin(format!("{}: {}", name, message))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

pub(crate) fn check_arguments(
    name: &str,
    args: &[Gc<Object>],
    expected: usize,
) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(EvaluationError::Builtin(format!(
            "{} expects {} argument{}, got {}",
            name,
            expected,
            plural(expected),
            args.len()
        )));
    }
    Ok(())
}

pub(crate) fn check_arguments_at_least(
    name: &str,
    args: &[Gc<Object>],
    minimum: usize,
) -> Result<(), EvaluationError> {
    if args.len() < minimum {
        return Err(EvaluationError::Builtin(format!(
            "{} expects at least {} argument{}, got {}",
            name,
            minimum,
            plural(minimum),
            args.len()
        )));
    }
    Ok(())
}

fn ordinal(index: usize) -> &'static str {
    match index {
        0 => "first",
        1 => "second",
        2 => "third",
        _ => "next",
    }
}

fn argument<'a>(
    name: &str,
    args: &'a [Gc<Object>],
    index: usize,
) -> Result<&'a Object, EvaluationError> {
    match args.get(index) {
        Some(arg) => Ok(&**arg),
        None => Err(EvaluationError::Builtin(format!(
            "{} expects at least {} argument{}, got {}",
            name,
            index + 1,
            plural(index + 1),
            args.len()
        ))),
    }
}

pub(crate) fn wrong_type(
    name: &str,
    index: usize,
    expected: &str,
    got: &Object,
) -> EvaluationError {
    EvaluationError::Builtin(format!(
        "{} expects a {} as its {} argument, got {}",
        name,
        expected,
        ordinal(index),
        got.type_name()
    ))
}

pub(crate) fn text_argument<'a>(
    name: &str,
    args: &'a [Gc<Object>],
    index: usize,
) -> Result<&'a str, EvaluationError> {
    match argument(name, args, index)? {
        Object::Text(text) => Ok(&**text),
        other => Err(wrong_type(name, index, "text", other)),
    }
}

pub(crate) fn number_argument(
    name: &str,
    args: &[Gc<Object>],
    index: usize,
) -> Result<f64, EvaluationError> {
    match argument(name, args, index)? {
        Object::Number(number) => Ok(*number),
        other => Err(wrong_type(name, index, "number", other)),
    }
}

pub(crate) fn list_argument<'a>(
    name: &str,
    args: &'a [Gc<Object>],
    index: usize,
) -> Result<&'a [Gc<Object>], EvaluationError> {
    match argument(name, args, index)? {
        Object::List(list) => Ok(list.as_slice()),
        other => Err(wrong_type(name, index, "list", other)),
    }
}

pub(crate) fn record_argument<'a>(
    name: &str,
    args: &'a [Gc<Object>],
    index: usize,
) -> Result<&'a GcCell<Record>, EvaluationError> {
    match argument(name, args, index)? {
        Object::Record(record) => Ok(record),
        other => Err(wrong_type(name, index, "record", other)),
    }
}

pub(crate) fn function_argument<'a>(
    name: &str,
    args: &'a [Gc<Object>],
    index: usize,
) -> Result<&'a Gc<Object>, EvaluationError> {
    argument(name, args, index)?;
    let function = &args[index];
    if function.is_callable() {
        Ok(function)
    } else {
        Err(wrong_type(name, index, "function", function))
    }
}

fn builtin_print(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    let line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<String>>()
        .join(" ");
    println!("{}", line);
    Ok(Object::nil())
}

fn builtin_len(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("len", &args, 1)?;
    match &*args[0] {
        Object::Text(text) => Ok(Object::number(text.chars().count() as f64)),
        Object::List(list) => Ok(Object::number(list.len() as f64)),
        Object::Record(record) => Ok(Object::number(record.borrow().fields.len() as f64)),
        other => Err(wrong_type("len", 0, "list, text or record", other)),
    }
}
