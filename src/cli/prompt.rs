//! Line-oriented terminal I/O shared by every command.
//!
//! Generic over the reader and writer so commands can be driven from tests
//! with in-memory buffers.

use crate::errors::{Error, Result};
use std::io::{BufRead, Write};

/// Input/output pair plus the `--yes` flag.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps a reader and writer. With `assume_yes`, [`Terminal::confirm`]
    /// answers yes without reading.
    pub const fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Prints one block of text followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `prompt` and reads one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Terminal::ask`], but end of input is an error.
    pub fn ask_required(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)?.ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ))
        })
    }

    /// Asks a yes/no question; anything but an explicit yes declines.
    /// Always `true` when running with `--yes`.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let answer = self.ask(&format!("{question} [s/N] "))?.unwrap_or_default();
        Ok(matches!(
            answer.to_lowercase().as_str(),
            "s" | "sim" | "y" | "yes"
        ))
    }

    /// Consumes the terminal, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
