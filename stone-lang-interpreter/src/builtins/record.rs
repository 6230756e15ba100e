use std::collections::HashSet;
use std::rc::Rc;

use gc::Gc;

use super::{builtin_error, check_arguments, record_argument, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("record.keys", record_keys),
    ("record.values", record_values),
    ("record.get", record_get),
    ("record.has", record_has),
    ("record.set", record_set),
    ("record.stone", record_stone),
    ("record.stoned", record_stoned),
];

/// Keys in sorted order, so that scripts see a stable order.
fn record_keys(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.keys", &args, 1)?;
    let record = record_argument("record.keys", &args, 0)?.borrow();
    let keys = record
        .sorted_fields()
        .into_iter()
        .map(|(key, _)| Object::text(key.clone()))
        .collect();
    Ok(Object::list(keys))
}

/// Values in the order of `record.keys`.
fn record_values(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.values", &args, 1)?;
    let record = record_argument("record.values", &args, 0)?.borrow();
    let values = record
        .sorted_fields()
        .into_iter()
        .map(|(_, value)| value.clone())
        .collect();
    Ok(Object::list(values))
}

fn record_get(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.get", &args, 2)?;
    let record = record_argument("record.get", &args, 0)?;
    let key = text_argument("record.get", &args, 1)?;
    let value = record.borrow().fields.get(key).cloned();
    Ok(value.unwrap_or_else(Object::nil))
}

fn record_has(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.has", &args, 2)?;
    let record = record_argument("record.has", &args, 0)?;
    let key = text_argument("record.has", &args, 1)?;
    let has = record.borrow().fields.contains_key(key);
    Ok(Object::boolean(has))
}

/// Whether `target` is reachable from `value` through lists and records.
/// Functions are not followed: their environments never take part in
/// printing or comparison.
fn reaches(
    value: &Gc<Object>,
    target: &Gc<Object>,
    visited: &mut HashSet<*const Object>,
) -> bool {
    if Gc::ptr_eq(value, target) {
        return true;
    }
    if !visited.insert(&**value as *const Object) {
        return false;
    }
    match &**value {
        Object::List(list) => list.iter().any(|item| reaches(item, target, visited)),
        Object::Record(record) => record
            .borrow()
            .fields
            .values()
            .any(|field| reaches(field, target, visited)),
        _ => false,
    }
}

/// Inserts or replaces a field in place. Every holder of the record sees
/// the change. Records stay acyclic: a value that contains the record
/// itself is rejected.
fn record_set(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.set", &args, 3)?;
    let record = record_argument("record.set", &args, 0)?;
    let key = text_argument("record.set", &args, 1)?;
    if record.borrow().stoned {
        return Err(builtin_error(
            "record.set",
            format!("cannot set `{}` on a stoned record", key),
        ));
    }
    if reaches(&args[2], &args[0], &mut HashSet::new()) {
        return Err(builtin_error(
            "record.set",
            format!("cannot set `{}` to a value that contains the record", key),
        ));
    }
    record.borrow_mut().fields.insert(Rc::from(key), args[2].clone());
    Ok(Object::nil())
}

/// Stoning is permanent. Returns the record itself for chaining.
fn record_stone(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.stone", &args, 1)?;
    record_argument("record.stone", &args, 0)?.borrow_mut().stoned = true;
    Ok(args[0].clone())
}

fn record_stoned(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("record.stoned", &args, 1)?;
    let stoned = record_argument("record.stoned", &args, 0)?.borrow().stoned;
    Ok(Object::boolean(stoned))
}

#[cfg(test)]
mod tests {
    use crate::builtins::tests::{error, test_builtins};
    use crate::object::Object;

    #[test]
    fn test_record() {
        let inputs = vec![
            (
                "record.keys({ b = 1, a = 2 })",
                Ok(Object::list(vec![Object::text("a"), Object::text("b")])),
            ),
            (
                "record.values({ b = 1, a = 2 })",
                Ok(Object::list(vec![Object::number(2.0), Object::number(1.0)])),
            ),
            ("record.get({ a = 1 }, \"a\")", Ok(Object::number(1.0))),
            ("record.get({ a = 1 }, \"b\")", Ok(Object::nil())),
            ("record.has({ a = nil }, \"a\")", Ok(Object::boolean(true))),
            ("record.has({}, \"a\")", Ok(Object::boolean(false))),
            ("r = {} record.set(r, \"x\", 5) r.x", Ok(Object::number(5.0))),
            (
                "r = { x = 1 } alias = r record.set(alias, \"x\", 2) r.x",
                Ok(Object::number(2.0)),
            ),
            ("record.stoned({})", Ok(Object::boolean(false))),
            ("r = record.stone({ a = 1 }) record.stoned(r)", Ok(Object::boolean(true))),
            (
                "r = record.stone({ a = 1 }) record.set(r, \"a\", 2)",
                error("record.set: cannot set `a` on a stoned record"),
            ),
            (
                "record.set(list, \"push\", 1)",
                error("record.set: cannot set `push` on a stoned record"),
            ),
            (
                // stoning freezes the keys, not the values they hold
                "inner = { n = 1 } r = record.stone({ inner = inner }) record.set(r.inner, \"n\", 2) r.inner.n",
                Ok(Object::number(2.0)),
            ),
            (
                "r = {} record.set(r, \"me\", r)",
                error("record.set: cannot set `me` to a value that contains the record"),
            ),
            (
                "r = {} record.set(r, \"all\", [1, { inner = [r] }])",
                error("record.set: cannot set `all` to a value that contains the record"),
            ),
            (
                "a = {} b = { a = a } record.set(a, \"b\", b)",
                error("record.set: cannot set `b` to a value that contains the record"),
            ),
            (
                // shared, but not cyclic
                "leaf = { n = 1 } r = { x = leaf } record.set(r, \"y\", [leaf, leaf]) conv.string(r)",
                Ok(Object::text("{x = {n = 1}, y = [{n = 1}, {n = 1}]}")),
            ),
            (
                "r = {} record.set(r, \"f\", func() return r end) conv.string(r.f())",
                Ok(Object::text("{f = func ()}")),
            ),
            (
                "record.keys([])",
                error("record.keys expects a record as its first argument, got list"),
            ),
        ];

        test_builtins(inputs);
    }
}
