use std::collections::HashMap;
use std::rc::Rc;

use gc::Gc;
use serde_json::Value as JsonValue;

use super::{builtin_error, check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] =
    &[("json.string", json_string), ("json.parse", json_parse)];

// Integral numbers up to 2^53 are written without a fraction, everything a
// JSON document cannot hold (functions, NaN, infinities) becomes null.
fn to_json(object: &Object) -> JsonValue {
    match object {
        Object::Nil | Object::Function(_) | Object::Builtin(_) => JsonValue::Null,
        Object::Boolean(value) => JsonValue::Bool(*value),
        Object::Number(value) if value.fract() == 0.0 && value.abs() <= 9_007_199_254_740_992.0 => {
            JsonValue::from(*value as i64)
        }
        Object::Number(value) => serde_json::Number::from_f64(*value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Object::Text(value) => JsonValue::String(value.to_string()),
        Object::List(list) => JsonValue::Array(list.iter().map(|item| to_json(item)).collect()),
        Object::Record(record) => {
            let mut map = serde_json::Map::new();
            for (key, value) in &record.borrow().fields {
                map.insert(key.to_string(), to_json(value));
            }
            JsonValue::Object(map)
        }
    }
}

fn from_json(json: &JsonValue) -> Gc<Object> {
    match json {
        JsonValue::Null => Object::nil(),
        JsonValue::Bool(value) => Object::boolean(*value),
        JsonValue::Number(number) => Object::number(number.as_f64().unwrap_or(f64::NAN)),
        JsonValue::String(value) => Object::text(value.as_str()),
        JsonValue::Array(array) => Object::list(array.iter().map(from_json).collect()),
        JsonValue::Object(map) => Object::record(
            map.iter()
                .map(|(key, value)| (Rc::from(key.as_str()), from_json(value)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

fn json_string(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("json.string", &args, 1)?;
    let json = serde_json::to_string(&to_json(&args[0]))
        .map_err(|err| builtin_error("json.string", err))?;
    Ok(Object::text(json))
}

fn json_parse(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("json.parse", &args, 1)?;
    let text = text_argument("json.parse", &args, 0)?;
    let json = serde_json::from_str::<JsonValue>(text)
        .map_err(|err| builtin_error("json.parse", err))?;
    Ok(from_json(&json))
}
