use gc::Gc;

use super::{check_arguments, check_arguments_at_least, number_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("math.max", math_max),
    ("math.min", math_min),
    ("math.abs", math_abs),
    ("math.floor", math_floor),
    ("math.ceil", math_ceil),
    ("math.sqrt", math_sqrt),
];

fn fold_numbers(
    name: &str,
    args: &[Gc<Object>],
    pick: fn(f64, f64) -> f64,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments_at_least(name, args, 1)?;
    let mut result = number_argument(name, args, 0)?;
    for index in 1..args.len() {
        result = pick(result, number_argument(name, args, index)?);
    }
    Ok(Object::number(result))
}

fn math_max(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    fold_numbers("math.max", &args, f64::max)
}

fn math_min(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    fold_numbers("math.min", &args, f64::min)
}

fn map_number(
    name: &str,
    args: &[Gc<Object>],
    func: fn(f64) -> f64,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments(name, args, 1)?;
    Ok(Object::number(func(number_argument(name, args, 0)?)))
}

fn math_abs(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    map_number("math.abs", &args, f64::abs)
}

fn math_floor(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    map_number("math.floor", &args, f64::floor)
}

fn math_ceil(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    map_number("math.ceil", &args, f64::ceil)
}

fn math_sqrt(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    map_number("math.sqrt", &args, f64::sqrt)
}
