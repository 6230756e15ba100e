use std::time::{Duration, SystemTime, UNIX_EPOCH};

use gc::Gc;

use super::{builtin_error, check_arguments, number_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] =
    &[("time.now", time_now), ("time.sleep", time_sleep)];

/// Whole seconds since the unix epoch.
fn time_now(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("time.now", &args, 0)?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| builtin_error("time.now", err))?;
    Ok(Object::number(now.as_secs() as f64))
}

fn time_sleep(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("time.sleep", &args, 1)?;
    let seconds = number_argument("time.sleep", &args, 0)?;
    let duration = Duration::try_from_secs_f64(seconds).map_err(|err| {
        builtin_error("time.sleep", format!("invalid duration {}: {}", seconds, err))
    })?;
    std::thread::sleep(duration);
    Ok(Object::nil())
}
