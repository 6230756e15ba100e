mod repl;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use stone_lang_interpreter::evaluator::EvaluatorConfig;
use tracing_subscriber::EnvFilter;

use runner::Session;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Print the tokens of the input
    Lex,
    /// Print the parsed program
    Parse,
    /// Evaluate the program and print its value
    Eval,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to run; starts a REPL when omitted
    path: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Mode::Eval)]
    mode: Mode,
    /// Folder that receives `info.log` and `error.log`
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,
    /// Diagnostics filter, overrides RUST_LOG (e.g. `debug`, `stone_lang_interpreter=trace`)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) -> Result<(), String> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).map_err(|err| err.to_string())?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("invalid log level: {}", err);
        return ExitCode::FAILURE;
    }

    let session = Session::new(EvaluatorConfig {
        log_folder: cli.log_dir,
    });

    match cli.path {
        None => match repl::start(cli.mode, session) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        },
        Some(path) => {
            let source = match std::fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!("could not read {}: {}", path.display(), err);
                    return ExitCode::FAILURE;
                }
            };
            runner::execute(&source, cli.mode, session)
        }
    }
}
