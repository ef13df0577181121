//! Sources of operator input.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// Prompt label shown before each line of input.
pub const INPUT_PROMPT: &str = "You: ";

/// A source of operator input, one line per turn.
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `Ok(None)` when the operator has ended input (end of file or
    /// an interrupt at the prompt).
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal input backed by rustyline, with in-memory history.
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    /// Creates a line editor attached to the terminal.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| Error::input(format!("could not initialize line editor: {e}")))?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(Error::input(err.to_string())),
        }
    }
}

/// Pre-recorded input, mainly for scripted sessions.
impl LineSource for std::vec::IntoIter<String> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.next())
    }
}
