//! Classification of operator input.
//!
//! A line is either a termination keyword, empty, or a prompt to forward to
//! the completion service verbatim.  Whitespace-only lines are prompts.

/// Inputs that end the session, compared case-insensitively.
pub const TERMINATION_KEYWORDS: [&str; 3] = ["quit", "exit", "bye"];

/// A classified line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput<'a> {
    /// End the session.
    Terminate,

    /// An empty line; prompt again.
    Blank,

    /// Forward this exact text as a prompt.
    Prompt(&'a str),
}

/// Returns true if `line` is a termination keyword.
///
/// The whole line must match; surrounding whitespace is significant.
///
/// ```
/// # use parley::chat::is_termination_keyword;
/// assert!(is_termination_keyword("QUIT"));
/// assert!(is_termination_keyword("Bye"));
/// assert!(!is_termination_keyword("quit now"));
/// ```
pub fn is_termination_keyword(line: &str) -> bool {
    let lowered = line.to_lowercase();
    TERMINATION_KEYWORDS.contains(&lowered.as_str())
}

/// Classifies a line of operator input.
pub fn parse_input(line: &str) -> ChatInput<'_> {
    if is_termination_keyword(line) {
        ChatInput::Terminate
    } else if line.is_empty() {
        ChatInput::Blank
    } else {
        ChatInput::Prompt(line)
    }
}
