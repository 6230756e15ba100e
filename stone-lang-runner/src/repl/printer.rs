use crate::runner::Failure;

pub struct Printer {}

impl Printer {
    pub fn print(&mut self, result: Result<String, Failure>) {
        match result {
            Ok(output) => println!("{}", output),
            Err(failure) => println!("{}", failure),
        }
    }
}
