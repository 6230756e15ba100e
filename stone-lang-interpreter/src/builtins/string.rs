use gc::Gc;

use super::{check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("string.has", string_has),
    ("string.has_uncased", string_has_uncased),
    ("string.upper", string_upper),
    ("string.lower", string_lower),
    ("string.split", string_split),
    ("string.trim", string_trim),
];

fn string_has(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.has", &args, 2)?;
    let text = text_argument("string.has", &args, 0)?;
    let needle = text_argument("string.has", &args, 1)?;
    Ok(Object::boolean(text.contains(needle)))
}

fn string_has_uncased(
    _: &Evaluator,
    args: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.has_uncased", &args, 2)?;
    let text = text_argument("string.has_uncased", &args, 0)?.to_lowercase();
    let needle = text_argument("string.has_uncased", &args, 1)?.to_lowercase();
    Ok(Object::boolean(text.contains(&needle)))
}

fn string_upper(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.upper", &args, 1)?;
    Ok(Object::text(text_argument("string.upper", &args, 0)?.to_uppercase()))
}

fn string_lower(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.lower", &args, 1)?;
    Ok(Object::text(text_argument("string.lower", &args, 0)?.to_lowercase()))
}

/// An empty separator splits the text into its characters.
fn string_split(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.split", &args, 2)?;
    let text = text_argument("string.split", &args, 0)?;
    let separator = text_argument("string.split", &args, 1)?;
    let parts = if separator.is_empty() {
        text.chars().map(|ch| Object::text(ch.to_string())).collect()
    } else {
        text.split(separator).map(Object::text).collect()
    };
    Ok(Object::list(parts))
}

fn string_trim(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("string.trim", &args, 1)?;
    Ok(Object::text(text_argument("string.trim", &args, 0)?.trim()))
}
