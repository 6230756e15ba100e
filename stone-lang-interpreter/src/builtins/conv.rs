use gc::Gc;

use super::{builtin_error, check_arguments};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] =
    &[("conv.string", conv_string), ("conv.number", conv_number)];

fn conv_string(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("conv.string", &args, 1)?;
    Ok(Object::text(args[0].to_string()))
}

/// Parses the display form of the argument, so `conv.number("12.5")` and
/// `conv.number(12.5)` agree.
fn conv_number(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("conv.number", &args, 1)?;
    if let Object::Number(_) = &*args[0] {
        return Ok(args[0].clone());
    }
    let text = args[0].to_string();
    match text.trim().parse::<f64>() {
        Ok(number) => Ok(Object::number(number)),
        Err(_) => Err(builtin_error(
            "conv.number",
            format!("cannot convert `{}` to a number", text),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::tests::{error, test_builtins};
    use crate::object::Object;

    #[test]
    fn test_conv() {
        let inputs = vec![
            ("conv.string(52)", Ok(Object::text("52"))),
            ("conv.string(10.5)", Ok(Object::text("10.5"))),
            ("conv.string([1, \"a\"])", Ok(Object::text("[1, a]"))),
            ("conv.string(nil)", Ok(Object::text("nil"))),
            ("conv.number(\"12.5\")", Ok(Object::number(12.5))),
            ("conv.number(\" 7 \")", Ok(Object::number(7.0))),
            ("conv.number(3)", Ok(Object::number(3.0))),
            (
                "conv.number(\"abc\")",
                error("conv.number: cannot convert `abc` to a number"),
            ),
            ("conv.number()", error("conv.number expects 1 argument, got 0")),
        ];

        test_builtins(inputs);
    }
}
