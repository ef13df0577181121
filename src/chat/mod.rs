//! Chat application module for interactive conversations.
//!
//! This module provides the REPL used by `parley-chat`:
//!
//! - Termination keywords (`quit`, `exit`, `bye`) end the session
//! - Every other non-empty line, whitespace included, is sent as a
//!   single-turn prompt
//! - Replies and failures are printed as one `Chatbot:` line per turn
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: the session state machine and loop
//! - [`commands`]: classification of operator input
//! - [`input`]: line sources (terminal or recorded)
//! - [`render`]: output rendering

mod commands;
mod config;
mod input;
mod render;
mod session;

pub use commands::{ChatInput, TERMINATION_KEYWORDS, is_termination_keyword, parse_input};
pub use config::{ChatArgs, ChatConfig};
pub use input::{EditorInput, INPUT_PROMPT, LineSource};
pub use render::{PlainTextRenderer, REPLY_LABEL, Renderer};
pub use session::{ChatSession, SessionState};
