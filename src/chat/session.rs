//! The chat session loop.
//!
//! A session starts out awaiting input.  Each prompt becomes exactly one
//! completion request whose reply is rendered before the next line is read.
//! A termination keyword or the end of input moves the session to its
//! terminal state, from which it never leaves.

use crate::chat::commands::{ChatInput, parse_input};
use crate::chat::input::{INPUT_PROMPT, LineSource};
use crate::chat::render::Renderer;
use crate::client::CompletionService;
use crate::completion::reply_to;
use crate::error::Result;
use crate::observability::CHAT_TURNS;
use crate::types::{ChatCompletionCreateParams, Model};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next line from the operator.
    AwaitingInput,
    /// Finished; no further requests will be made.
    Terminated,
}

/// A chat session that forwards each prompt to a completion service.
///
/// No history is kept: every request holds only the current prompt.
pub struct ChatSession<S: CompletionService> {
    service: S,
    model: Model,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    state: SessionState,
    turns: u64,
}

impl<S: CompletionService> ChatSession<S> {
    /// Creates a new session answering with `model`.
    pub fn new(service: S, model: Model) -> Self {
        Self {
            service,
            model,
            temperature: None,
            max_tokens: None,
            state: SessionState::AwaitingInput,
            turns: 0,
        }
    }

    /// Sets the sampling temperature sent with every request.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the token cap sent with every request.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the model used for replies.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the number of completion requests issued so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Returns the underlying completion service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Builds the single-message request for `prompt`.
    fn request_for(&self, prompt: &str) -> ChatCompletionCreateParams {
        let mut params = ChatCompletionCreateParams::single_turn(self.model.clone(), prompt);
        if let Some(temperature) = self.temperature {
            params = params.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            params = params.with_max_tokens(max_tokens);
        }
        params
    }

    /// Handles one line of operator input and returns the resulting state.
    ///
    /// A prompt is sent and its reply (or the failure text) rendered before
    /// this returns.  Lines received after termination are ignored.
    pub async fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> SessionState {
        if self.state == SessionState::Terminated {
            return self.state;
        }
        match parse_input(line) {
            ChatInput::Terminate => {
                tracing::debug!(turns = self.turns, "termination keyword received");
                self.state = SessionState::Terminated;
            }
            ChatInput::Blank => {}
            ChatInput::Prompt(prompt) => {
                self.turns += 1;
                CHAT_TURNS.click();
                let reply = reply_to(&self.service, self.request_for(prompt)).await;
                renderer.print_reply(&reply);
            }
        }
        self.state
    }

    /// Reads lines from `input` until the session terminates.
    ///
    /// End of input terminates the session normally.  An input device error
    /// terminates it and is returned.
    pub async fn run<L>(&mut self, input: &mut L, renderer: &mut dyn Renderer) -> Result<()>
    where
        L: LineSource + ?Sized,
    {
        while self.state == SessionState::AwaitingInput {
            match input.read_line(INPUT_PROMPT) {
                Ok(Some(line)) => {
                    self.handle_line(&line, renderer).await;
                }
                Ok(None) => {
                    tracing::debug!(turns = self.turns, "input closed");
                    self.state = SessionState::Terminated;
                }
                Err(err) => {
                    self.state = SessionState::Terminated;
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}
