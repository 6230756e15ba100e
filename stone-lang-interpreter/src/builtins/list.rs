use gc::Gc;

use super::{check_arguments, function_argument, list_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

// Lists are values: every operation here returns a new list and leaves its
// argument untouched.

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("list.push", list_push),
    ("list.first", list_first),
    ("list.last", list_last),
    ("list.tail", list_tail),
    ("list.each", list_each),
    ("list.map", list_map),
    ("list.filter", list_filter),
    ("list.reduce", list_reduce),
    ("list.flat", list_flat),
    ("list.has", list_has),
];

fn list_push(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.push", &args, 2)?;
    let mut list = list_argument("list.push", &args, 0)?.to_vec();
    list.push(args[1].clone());
    Ok(Object::list(list))
}

fn list_first(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.first", &args, 1)?;
    let list = list_argument("list.first", &args, 0)?;
    Ok(list.first().cloned().unwrap_or_else(Object::nil))
}

fn list_last(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.last", &args, 1)?;
    let list = list_argument("list.last", &args, 0)?;
    Ok(list.last().cloned().unwrap_or_else(Object::nil))
}

fn list_tail(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.tail", &args, 1)?;
    let list = list_argument("list.tail", &args, 0)?;
    Ok(Object::list(list.iter().skip(1).cloned().collect()))
}

fn list_each(
    evaluator: &Evaluator,
    args: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.each", &args, 2)?;
    let list = list_argument("list.each", &args, 0)?;
    let function = function_argument("list.each", &args, 1)?;
    for item in list {
        evaluator.call(function, vec![item.clone()])?;
    }
    Ok(Object::nil())
}

fn list_map(evaluator: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.map", &args, 2)?;
    let list = list_argument("list.map", &args, 0)?;
    let function = function_argument("list.map", &args, 1)?;
    let mapped = list
        .iter()
        .map(|item| evaluator.call(function, vec![item.clone()]))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Object::list(mapped))
}

fn list_filter(
    evaluator: &Evaluator,
    args: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.filter", &args, 2)?;
    let list = list_argument("list.filter", &args, 0)?;
    let function = function_argument("list.filter", &args, 1)?;
    let mut filtered = Vec::new();
    for item in list {
        if evaluator.call(function, vec![item.clone()])?.is_truthy() {
            filtered.push(item.clone());
        }
    }
    Ok(Object::list(filtered))
}

/// `list.reduce(list, func(accumulator, item), initial)`
fn list_reduce(
    evaluator: &Evaluator,
    args: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.reduce", &args, 3)?;
    let list = list_argument("list.reduce", &args, 0)?;
    let function = function_argument("list.reduce", &args, 1)?;
    let mut accumulator = args[2].clone();
    for item in list {
        accumulator = evaluator.call(function, vec![accumulator, item.clone()])?;
    }
    Ok(accumulator)
}

/// Flattens one level of nesting.
fn list_flat(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.flat", &args, 1)?;
    let list = list_argument("list.flat", &args, 0)?;
    let mut flattened = Vec::with_capacity(list.len());
    for item in list {
        match &**item {
            Object::List(inner) => flattened.extend(inner.iter().cloned()),
            _ => flattened.push(item.clone()),
        }
    }
    Ok(Object::list(flattened))
}

fn list_has(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("list.has", &args, 2)?;
    let list = list_argument("list.has", &args, 0)?;
    Ok(Object::boolean(list.contains(&args[1])))
}
