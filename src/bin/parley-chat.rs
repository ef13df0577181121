//! Interactive chat with an OpenAI model from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; OPENAI_API_KEY comes from the environment or ./.env
//! parley-chat
//!
//! # Specify a model
//! parley-chat --model gpt-4o-mini
//!
//! # Cooler, shorter replies
//! parley-chat --temperature 0.2 --max-tokens 200
//!
//! # Talk to an OpenAI-compatible server
//! parley-chat --base-url http://localhost:11434/v1 --model llama3.1
//! ```
//!
//! Type `quit`, `exit` or `bye` (any case) to leave.  Set `RUST_LOG=debug`
//! to see request logs on stderr.

use std::process;

use arrrg::CommandLine;
use tracing_subscriber::EnvFilter;

use parley::OpenAI;
use parley::chat::{ChatArgs, ChatConfig, ChatSession, EditorInput, PlainTextRenderer, Renderer};
use parley::credential::{self, API_KEY_VARIABLE};

/// Exit status when no API key is available.
const MISSING_CREDENTIAL_EXIT_CODE: i32 = 1;

/// Exit status when the operator interrupts an in-flight request.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Main entry point for the parley-chat application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("parley-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = credential::load_env_file(&config.env_file) {
        tracing::warn!(error = %err, "ignoring environment file");
    }
    let credential = match credential::resolve_or_remediate(API_KEY_VARIABLE, |name| {
        std::env::var(name).ok()
    }) {
        Ok(credential) => credential,
        Err(lines) => {
            for line in lines {
                println!("{line}");
            }
            process::exit(MISSING_CREDENTIAL_EXIT_CODE);
        }
    };

    let client = OpenAI::with_options(credential, Some(&config.base_url), config.timeout)?;
    let mut session = ChatSession::new(client, config.model.clone())
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);
    let mut renderer = PlainTextRenderer::new();
    let mut input = EditorInput::new()?;

    // Ctrl+C at the prompt is handled by the line editor; this fires only
    // while a request is in flight.
    ctrlc::set_handler(|| process::exit(INTERRUPTED_EXIT_CODE))?;

    tracing::debug!(model = %session.model(), base_url = %config.base_url, "starting chat session");
    if let Err(err) = session.run(&mut input, &mut renderer).await {
        renderer.print_error(&err.to_string());
        process::exit(1);
    }

    Ok(())
}
