//! Output rendering for the chat application.
//!
//! Replies go to stdout as a single labelled line per turn.  Errors that are
//! not replies (a broken input device, for instance) go to stderr.

use std::io::{self, Stdout, Write};

/// Label printed before every reply.
pub const REPLY_LABEL: &str = "Chatbot:";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print the reply for one turn.
    fn print_reply(&mut self, reply: &str);

    /// Print an error message that is not a reply.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer writing labelled lines.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a renderer writing to stdout.
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        // Nowhere to report a failed write to stdout.
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_reply(&mut self, reply: &str) {
        self.write_line(&format!("{REPLY_LABEL} {reply}"));
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_is_labelled() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new());
        renderer.print_reply("Hi there!");
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "Chatbot: Hi there!\n");
    }
}
