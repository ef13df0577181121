// Public modules
pub mod chat_completion;
pub mod chat_completion_create_params;
pub mod chat_message;
pub mod completion_usage;
pub mod error_object;
pub mod model;

// Re-exports
pub use chat_completion::{ChatCompletion, Choice, FinishReason};
pub use chat_completion_create_params::ChatCompletionCreateParams;
pub use chat_message::{ChatMessage, Role};
pub use completion_usage::CompletionUsage;
pub use error_object::{ErrorObject, ErrorResponse};
pub use model::{KnownModel, Model};
