// Public modules
pub mod chat;
pub mod client;
pub mod completion;
pub mod credential;
pub mod error;
pub mod observability;
pub mod types;

// Re-exports
pub use client::{CompletionService, OpenAI};
pub use completion::{CompletionFailure, complete, complete_request, reply_to};
pub use credential::SessionCredential;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
