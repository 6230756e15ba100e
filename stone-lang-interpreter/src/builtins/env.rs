use std::env::VarError;

use gc::Gc;

use super::{builtin_error, check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[("env.get", env_get), ("env.set", env_set)];

/// `nil` when the variable is not set.
fn env_get(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("env.get", &args, 1)?;
    let key = text_argument("env.get", &args, 0)?;
    match std::env::var(key) {
        Ok(value) => Ok(Object::text(value)),
        Err(VarError::NotPresent) => Ok(Object::nil()),
        Err(err) => Err(builtin_error("env.get", err)),
    }
}

fn env_set(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("env.set", &args, 2)?;
    let key = text_argument("env.set", &args, 0)?;
    let value = args[1].to_string();
    // set_var panics on these instead of returning an error
    if key.is_empty() || key.contains(&['=', '\0'][..]) || value.contains('\0') {
        return Err(builtin_error("env.set", format!("invalid variable `{}`", key)));
    }
    std::env::set_var(key, value);
    Ok(Object::nil())
}
