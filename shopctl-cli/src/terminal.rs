//! Console input sources
//!
//! On an interactive terminal prompts go through `inquire`, where Esc and
//! Ctrl-C cancel the current action. Piped input is read line by line.

use std::io::{self, IsTerminal};

use inquire::{InquireError, Text};
use shopctl_core::{InputError, LineInput, LineReader};

/// Check if both ends of the console are a terminal
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Pick the input source for this session
pub fn session_input(cancel_keyword: &str) -> Box<dyn LineInput> {
    if is_interactive() {
        Box::new(TerminalInput::new(cancel_keyword))
    } else {
        Box::new(LineReader::new(io::stdin().lock(), io::stdout()).with_cancel_keyword(cancel_keyword))
    }
}

pub struct TerminalInput {
    cancel_keyword: String,
}

impl TerminalInput {
    pub fn new(cancel_keyword: impl Into<String>) -> Self {
        Self {
            cancel_keyword: cancel_keyword.into(),
        }
    }
}

impl LineInput for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        let help = format!("{} to cancel", self.cancel_keyword);
        let answer = Text::new(prompt.trim_end())
            .with_help_message(&help)
            .prompt()
            .map_err(input_error)?;

        if !self.cancel_keyword.is_empty() && answer.trim() == self.cancel_keyword {
            return Err(InputError::Cancelled);
        }
        Ok(answer)
    }
}

fn input_error(err: InquireError) -> InputError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            InputError::Cancelled
        }
        InquireError::NotTTY => InputError::Closed,
        InquireError::IO(err) => InputError::Io(err),
        other => InputError::Io(io::Error::other(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_interrupt_cancel() {
        assert!(matches!(
            input_error(InquireError::OperationCanceled),
            InputError::Cancelled
        ));
        assert!(matches!(
            input_error(InquireError::OperationInterrupted),
            InputError::Cancelled
        ));
    }

    #[test]
    fn lost_terminal_closes_input() {
        assert!(matches!(input_error(InquireError::NotTTY), InputError::Closed));
    }
}
