use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use gc::Gc;
use tracing::{error, info};

use super::{builtin_error, check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("log.info", log_info),
    ("log.error", log_error),
    ("log.set_folder", log_set_folder),
];

/// Appends the display form of `value` as one line to `file` inside the
/// evaluator's log folder, creating the file on first use.
fn append(
    name: &str,
    evaluator: &Evaluator,
    file: &str,
    value: &Object,
) -> Result<(), EvaluationError> {
    let path = evaluator.log_folder().join(file);
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| builtin_error(name, format!("{}: {}", path.display(), err)))?;
    writeln!(log, "{}", value).map_err(|err| builtin_error(name, err))
}

fn log_info(evaluator: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("log.info", &args, 1)?;
    info!(value = %args[0], "log.info");
    append("log.info", evaluator, "info.log", &args[0])?;
    Ok(Object::nil())
}

fn log_error(evaluator: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("log.error", &args, 1)?;
    error!(value = %args[0], "log.error");
    append("log.error", evaluator, "error.log", &args[0])?;
    Ok(Object::nil())
}

fn log_set_folder(
    evaluator: &Evaluator,
    args: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("log.set_folder", &args, 1)?;
    let folder = text_argument("log.set_folder", &args, 0)?;
    evaluator.set_log_folder(PathBuf::from(folder));
    Ok(Object::nil())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::builtins::tests::{error, eval, eval_with};
    use crate::evaluator::{Evaluator, EvaluatorConfig};
    use crate::object::Object;

    #[test]
    fn test_logs_are_appended() {
        let folder = tempfile::tempdir().unwrap();
        let evaluator = Evaluator::new(EvaluatorConfig {
            log_folder: folder.path().to_path_buf(),
        });

        let result = eval_with(
            &evaluator,
            "log.info(\"started\") log.info([1, 2]) log.error({ code = 3 })",
        );
        assert_eq!(result, Ok(Object::nil()));

        let info = fs::read_to_string(folder.path().join("info.log")).unwrap();
        assert_eq!(info, "started\n[1, 2]\n");
        let errors = fs::read_to_string(folder.path().join("error.log")).unwrap();
        assert_eq!(errors, "{code = 3}\n");
    }

    #[test]
    fn test_set_folder() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let evaluator = Evaluator::new(EvaluatorConfig {
            log_folder: first.path().to_path_buf(),
        });

        let input = format!("log.set_folder(\"{}\") log.info(\"moved\")", second.path().display());
        assert_eq!(eval_with(&evaluator, &input), Ok(Object::nil()));
        assert_eq!(evaluator.log_folder(), second.path());
        assert!(!first.path().join("info.log").exists());
        assert_eq!(fs::read_to_string(second.path().join("info.log")).unwrap(), "moved\n");
    }

    #[test]
    fn test_errors() {
        assert_eq!(eval("log.info()"), error("log.info expects 1 argument, got 0"));
        assert_eq!(
            eval("log.set_folder(1)"),
            error("log.set_folder expects a text as its first argument, got number")
        );

        let folder = tempfile::tempdir().unwrap();
        let evaluator = Evaluator::new(EvaluatorConfig {
            log_folder: folder.path().join("missing"),
        });
        let missing = eval_with(&evaluator, "log.error(1)").unwrap_err().to_string();
        assert!(missing.starts_with("log.error: "), "{}", missing);
    }
}
