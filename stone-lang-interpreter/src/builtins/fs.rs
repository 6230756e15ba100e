use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gc::Gc;

use super::{builtin_error, check_arguments, text_argument};
use crate::evaluator::Evaluator;
use crate::object::{BuiltinFn, EvaluationError, Object};

pub(super) const MEMBERS: &[(&str, BuiltinFn)] = &[
    ("fs.mkdir", fs_mkdir),
    ("fs.exists", fs_exists),
    ("fs.files", fs_files),
    ("fs.folders", fs_folders),
    ("fs.read", fs_read),
    ("fs.write", fs_write),
    ("fs.home", fs_home),
    ("fs.config", fs_config),
];

fn path_text(path: &Path) -> Gc<Object> {
    Object::text(path.to_string_lossy().into_owned())
}

/// Creates the folder and any missing parents.
fn fs_mkdir(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.mkdir", &args, 1)?;
    let path = text_argument("fs.mkdir", &args, 0)?;
    std::fs::create_dir_all(path).map_err(|err| builtin_error("fs.mkdir", err))?;
    Ok(Object::nil())
}

fn fs_exists(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.exists", &args, 1)?;
    let path = text_argument("fs.exists", &args, 0)?;
    match std::fs::metadata(path) {
        Ok(_) => Ok(Object::boolean(true)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Object::boolean(false)),
        Err(err) => Err(builtin_error("fs.exists", err)),
    }
}

/// Sorted paths of the entries of `folder` for which `keep` holds.
fn list_folder(
    name: &str,
    folder: &str,
    keep: fn(&Path) -> bool,
) -> Result<Gc<Object>, EvaluationError> {
    let entries = std::fs::read_dir(folder).map_err(|err| builtin_error(name, err))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| builtin_error(name, err))?;
        let path = Path::new(folder).join(entry.file_name());
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(Object::list(paths.iter().map(|path| path_text(path)).collect()))
}

fn fs_files(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.files", &args, 1)?;
    let folder = text_argument("fs.files", &args, 0)?;
    list_folder("fs.files", folder, |path| !path.is_dir())
}

fn fs_folders(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.folders", &args, 1)?;
    let folder = text_argument("fs.folders", &args, 0)?;
    list_folder("fs.folders", folder, |path| path.is_dir())
}

fn fs_read(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.read", &args, 1)?;
    let path = text_argument("fs.read", &args, 0)?;
    let content = std::fs::read_to_string(path).map_err(|err| builtin_error("fs.read", err))?;
    Ok(Object::text(content))
}

/// Writes the display form of the second argument, replacing the file.
fn fs_write(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_arguments("fs.write", &args, 2)?;
    let path = text_argument("fs.write", &args, 0)?;
    std::fs::write(path, args[1].to_string()).map_err(|err| builtin_error("fs.write", err))?;
    Ok(Object::nil())
}

fn known_folder(
    name: &str,
    args: &[Gc<Object>],
    folder: Option<PathBuf>,
) -> Result<Gc<Object>, EvaluationError> {
    check_arguments(name, args, 0)?;
    match folder {
        Some(folder) => Ok(path_text(&folder)),
        None => Err(builtin_error(name, "folder is unknown on this system")),
    }
}

fn fs_home(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    known_folder("fs.home", &args, dirs::home_dir())
}

fn fs_config(_: &Evaluator, args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    known_folder("fs.config", &args, dirs::config_dir())
}
