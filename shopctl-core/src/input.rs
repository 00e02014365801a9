//! Line-oriented user input
//!
//! Every prompt goes through [`LineInput`], which tells apart a line the user
//! submitted (possibly empty), an explicit cancel, end of input, and a read
//! failure. The workflows decide what each of those means for a field.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Typed at any prompt to abandon the current action
pub const DEFAULT_CANCEL_KEYWORD: &str = ":q";

#[derive(Error, Debug)]
pub enum InputError {
    /// The user asked to abandon the current action
    #[error("input cancelled")]
    Cancelled,

    /// No more input will arrive
    #[error("end of input")]
    Closed,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Source of answers to prompts
pub trait LineInput {
    /// Show `prompt` and read one line, without its line terminator
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

impl<T: LineInput + ?Sized> LineInput for &mut T {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        (**self).read_line(prompt)
    }
}

impl<T: LineInput + ?Sized> LineInput for Box<T> {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        (**self).read_line(prompt)
    }
}

/// Reads answers line by line from any `BufRead`, echoing prompts to `echo`.
///
/// Used for piped stdin and for scripted sessions in tests.
pub struct LineReader<R, W> {
    reader: R,
    echo: W,
    cancel_keyword: String,
}

impl<R: BufRead, W: Write> LineReader<R, W> {
    pub fn new(reader: R, echo: W) -> Self {
        Self {
            reader,
            echo,
            cancel_keyword: DEFAULT_CANCEL_KEYWORD.to_string(),
        }
    }

    pub fn with_cancel_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.cancel_keyword = keyword.into();
        self
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.echo)
    }
}

impl<R: BufRead, W: Write> LineInput for LineReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        writeln!(self.echo, "{}", prompt)?;
        self.echo.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if !self.cancel_keyword.is_empty() && line.trim() == self.cancel_keyword {
            return Err(InputError::Cancelled);
        }
        Ok(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(script: &str) -> LineReader<Cursor<Vec<u8>>, Vec<u8>> {
        LineReader::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_lines_and_echoes_prompts() {
        let mut input = reader("Smith\r\n\n");

        assert_eq!(input.read_line("Last name:").unwrap(), "Smith");
        assert_eq!(input.read_line("Phone:").unwrap(), "");

        let (_, echo) = input.into_inner();
        assert_eq!(String::from_utf8(echo).unwrap(), "Last name:\nPhone:\n");
    }

    #[test]
    fn end_of_input_is_closed_not_empty() {
        let mut input = reader("only\n");
        input.read_line("first").unwrap();
        assert!(matches!(input.read_line("second"), Err(InputError::Closed)));
    }

    #[test]
    fn cancel_keyword_cancels() {
        let mut input = reader("  :q \n").with_cancel_keyword(":q");
        assert!(matches!(input.read_line("vin"), Err(InputError::Cancelled)));

        let mut input = reader("abort\n:q\n").with_cancel_keyword("abort");
        assert!(matches!(input.read_line("a"), Err(InputError::Cancelled)));
        assert_eq!(input.read_line("b").unwrap(), ":q");
    }
}
