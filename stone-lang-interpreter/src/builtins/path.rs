use std::path::PathBuf;

use gc::Gc;

use super::text_argument;
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[("path.join", path_join)];

fn path_join(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    let mut path = PathBuf::new();
    for index in 0..args.len() {
        path.push(text_argument("path.join", &args, index)?);
    }
    Ok(Object::text(path.to_string_lossy().into_owned()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::builtins::tests::{error, eval, test_builtins};
    use crate::object::Object;

    #[test]
    fn test_join() {
        let expected: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(
            eval("path.join(\"a\", \"b\", \"c.txt\")"),
            Ok(Object::text(expected.to_string_lossy().into_owned()))
        );

        let inputs = vec![
            ("path.join()", Ok(Object::text(""))),
            ("path.join(\"a\")", Ok(Object::text("a"))),
            (
                "path.join(\"a\", 1)",
                error("path.join expects a text as its second argument, got number"),
            ),
        ];

        test_builtins(inputs);
    }
}
