use std::fmt::Display;
use std::process::ExitCode;

use stone_lang_core::lexer::Tokenizer;
use stone_lang_core::parser::{ParseError, Parser};
use stone_lang_interpreter::environment::Environment;
use stone_lang_interpreter::evaluator::{Evaluator, EvaluatorConfig};
use stone_lang_interpreter::object::EvaluationError;
use tracing::debug;

use crate::Mode;

#[derive(Debug, PartialEq)]
pub enum Failure {
    Parse(Vec<ParseError>),
    Evaluation(EvaluationError),
}

impl Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Parse(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", error)?;
                }
                Ok(())
            }
            Failure::Evaluation(error) => write!(f, "error: {}", error),
        }
    }
}

/// One evaluator and one global environment. The REPL keeps a single
/// session so bindings survive from one line to the next.
pub struct Session {
    evaluator: Evaluator,
    environment: Environment,
}

impl Session {
    pub fn new(config: EvaluatorConfig) -> Self {
        Session {
            evaluator: Evaluator::new(config),
            environment: Environment::new(),
        }
    }

    pub fn run(&mut self, source: &str, mode: Mode) -> Result<String, Failure> {
        debug!(?mode, bytes = source.len(), "running input");
        match mode {
            Mode::Lex => Ok(Tokenizer::new(source)
                .map(|token| format!("{}\t{}", token.position, token.kind))
                .collect::<Vec<String>>()
                .join("\n")),
            Mode::Parse => {
                let program = Parser::new(Tokenizer::new(source))
                    .parse_program()
                    .map_err(Failure::Parse)?;
                Ok(program.to_string().trim_end().to_owned())
            }
            Mode::Eval => {
                let program = Parser::new(Tokenizer::new(source))
                    .parse_program()
                    .map_err(Failure::Parse)?;
                let value = self
                    .evaluator
                    .eval_program(&program, &mut self.environment)
                    .map_err(Failure::Evaluation)?;
                Ok(value.to_string())
            }
        }
    }
}

/// Runs a whole script: output on stdout, errors on stderr one per line.
pub fn execute(source: &str, mode: Mode, mut session: Session) -> ExitCode {
    match session.run(source, mode) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{}", failure);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use stone_lang_interpreter::evaluator::EvaluatorConfig;

    use super::{Failure, Session};
    use crate::Mode;

    fn run(input: &str, mode: Mode) -> Result<String, Failure> {
        Session::new(EvaluatorConfig::default()).run(input, mode)
    }

    #[test]
    fn test_modes() {
        assert_eq!(
            run("a = 1", Mode::Lex),
            Ok("1:1\tidentifier `a`\n1:3\t`=`\n1:5\tnumber `1`".to_owned())
        );
        assert_eq!(run("a = 1 + 2 * 3", Mode::Parse), Ok("a = 1 + (2 * 3)".to_owned()));
        assert_eq!(run("a = 1 + 2 * 3 a", Mode::Eval), Ok("7".to_owned()));
    }

    #[test]
    fn test_session_keeps_bindings() {
        let mut session = Session::new(EvaluatorConfig::default());
        assert_eq!(session.run("x = 40", Mode::Eval), Ok("nil".to_owned()));
        assert_eq!(session.run("x += 2 x", Mode::Eval), Ok("42".to_owned()));
    }

    #[test]
    fn test_failures() {
        let parse = run("a = (1", Mode::Eval).unwrap_err();
        assert!(matches!(parse, Failure::Parse(_)));
        assert_eq!(parse.to_string(), "1:7: unexpected end of input, expected `)`");

        let evaluation = run("missing", Mode::Eval).unwrap_err();
        assert_eq!(evaluation.to_string(), "error: could not find identifier `missing`");
    }
}
