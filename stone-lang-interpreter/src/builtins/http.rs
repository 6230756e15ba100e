use gc::Gc;
use tracing::debug;

use super::{builtin_error, check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[("http.get", http_get)];

/// Blocking GET. The response body is returned as text; transport errors and
/// non-success statuses become evaluation errors.
fn http_get(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("http.get", &args, 1)?;
    let url = text_argument("http.get", &args, 0)?;
    debug!(url, "http get");
    let response = ureq::get(url)
        .call()
        .map_err(|err| builtin_error("http.get", err))?;
    let body = response
        .into_string()
        .map_err(|err| builtin_error("http.get", err))?;
    Ok(Object::text(body))
}
