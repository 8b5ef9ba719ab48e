//! Line-oriented console over a [`Yard`].
//!
//! Reads one command per line, runs it through the command table and
//! prints the reply. A failing command prints its error and the loop
//! carries on with the next line.

mod commands;
mod error;

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::yard::Yard;

pub use commands::{COMMANDS, CommandSpec, Reply, dispatch};
pub use error::CommandError;

/// Interactive session state.
pub struct Console {
    yard: Yard,
    prompt: bool,
}

impl Console {
    pub fn new(yard: Yard) -> Self {
        Self { yard, prompt: true }
    }

    /// Don't print a prompt before each line (for piped input).
    pub fn without_prompt(mut self) -> Self {
        self.prompt = false;
        self
    }

    pub fn yard(&self) -> &Yard {
        &self.yard
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(output, "yard> ")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            match dispatch(&mut self.yard, &line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
                Err(e) => {
                    debug!(command = %line, error = %e, "command failed");
                    writeln!(output, "Error: {e}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yard::{SequentialIds, YardConfig};

    fn console() -> Console {
        let yard = Yard::with_id_generator(YardConfig::default(), Box::new(SequentialIds::new(5)));
        Console::new(yard).without_prompt()
    }

    fn run_script(console: &mut Console, script: &str) -> String {
        let mut out = Vec::new();
        console.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let mut c = console();
        let out = run_script(
            &mut c,
            "create-station A\ncreate-station A\nfly\ncreate-station B\n",
        );
        assert_eq!(
            out,
            "Created station: A\n\
             Error: validation failed: station A already exists\n\
             Error: unknown command 'fly' (type 'help' for a list)\n\
             Created station: B\n"
        );
        assert_eq!(c.yard().stations().count(), 2);
    }

    #[test]
    fn quit_stops_reading() {
        let mut c = console();
        let out = run_script(&mut c, "create-station A\nquit\ncreate-station B\n");
        assert_eq!(out, "Created station: A\n");
        assert_eq!(c.yard().stations().count(), 1);
    }

    #[test]
    fn prompt_is_printed() {
        let yard = Yard::with_id_generator(YardConfig::default(), Box::new(SequentialIds::new(5)));
        let mut c = Console::new(yard);
        let out = run_script(&mut c, "stations\n");
        assert_eq!(out, "yard> There are no stations.\nyard> ");
    }

    #[test]
    fn boundary_error_is_reported() {
        let mut c = console();
        let out = run_script(
            &mut c,
            "create-station A\n\
             create-station B\n\
             create-route A B R1\n\
             create-cargo-train T-001\n\
             assign-route T-001 R1\n\
             move-forward T-001\n\
             move-forward T-001\n",
        );
        let last = out.lines().last().unwrap();
        assert_eq!(
            last,
            "Error: train T-001 cannot move forward from B: end of route"
        );
    }
}
