use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::warn;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(String),
}

pub struct Reader {
    rl: Editor<(), DefaultHistory>,
}

impl Reader {
    pub fn new(rl: Editor<(), DefaultHistory>) -> Self {
        Self { rl }
    }

    /// Ctrl-C drops the current line, Ctrl-D ends the session.
    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => Ok(ReadOutput::Clear),
            Err(ReadlineError::Eof) => Ok(ReadOutput::Exit),
            Err(err) => Err(err),
            Ok(line) if line.trim().is_empty() => Ok(ReadOutput::Clear),
            Ok(line) => {
                if let Err(err) = self.rl.add_history_entry(line.as_str()) {
                    warn!(%err, "could not record history");
                }
                Ok(ReadOutput::Value(line))
            }
        }
    }
}
