mod printer;
mod reader;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use printer::Printer;
use reader::{ReadOutput, Reader};

use crate::runner::Session;
use crate::Mode;

struct Repl {
    reader: Reader,
    session: Session,
    printer: Printer,
    mode: Mode,
}

impl Repl {
    fn run(mut self) -> Result<(), ReadlineError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(line) => {
                    let result = self.session.run(&line, self.mode);
                    self.printer.print(result)
                }
            }
        }
        Ok(())
    }
}

pub fn start(mode: Mode, session: Session) -> Result<(), ReadlineError> {
    let rl = DefaultEditor::new()?;

    Repl {
        reader: Reader::new(rl),
        session,
        printer: Printer {},
        mode,
    }
    .run()
}
