//! The single-turn completion request.
//!
//! [`complete`] sends one prompt with no history and returns the trimmed text
//! of the first choice.  Failures come back as a [`CompletionFailure`] whose
//! `Display` is the text the operator sees in place of a reply.

use std::fmt;

use crate::client::CompletionService;
use crate::error::Error;
use crate::observability::{CHAT_SERVICE_ERRORS, CHAT_UNEXPECTED_ERRORS};
use crate::types::{ChatCompletionCreateParams, Model};

/// Why a completion request produced no reply text.
#[derive(Debug, Clone)]
pub enum CompletionFailure {
    /// The API reported an error for the request.
    Service(Error),
    /// Anything else: transport failure, timeout, unexpected response shape.
    Unexpected(Error),
}

impl CompletionFailure {
    /// The underlying error.
    pub fn error(&self) -> &Error {
        match self {
            CompletionFailure::Service(err) => err,
            CompletionFailure::Unexpected(err) => err,
        }
    }

    /// Returns true if the API itself reported the failure.
    pub fn is_service(&self) -> bool {
        matches!(self, CompletionFailure::Service(_))
    }
}

impl From<Error> for CompletionFailure {
    fn from(err: Error) -> Self {
        if err.is_service_error() {
            CompletionFailure::Service(err)
        } else {
            CompletionFailure::Unexpected(err)
        }
    }
}

impl fmt::Display for CompletionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionFailure::Service(err) => write!(f, "OpenAI API returned an error: {err}"),
            CompletionFailure::Unexpected(err) => {
                write!(f, "An unexpected error occurred: {err}")
            }
        }
    }
}

impl std::error::Error for CompletionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error())
    }
}

/// Send `prompt` as a single user message to `model` and return the reply.
///
/// The request carries exactly one message.  On success the first choice's
/// content is returned with surrounding whitespace removed.
pub async fn complete<S>(
    service: &S,
    model: &Model,
    prompt: &str,
) -> Result<String, CompletionFailure>
where
    S: CompletionService + ?Sized,
{
    let params = ChatCompletionCreateParams::single_turn(model.clone(), prompt);
    complete_request(service, params).await
}

/// Send a prepared request and return the trimmed content of its first choice.
pub async fn complete_request<S>(
    service: &S,
    params: ChatCompletionCreateParams,
) -> Result<String, CompletionFailure>
where
    S: CompletionService + ?Sized,
{
    let completion = service.create_chat_completion(params).await?;
    if let Some(content) = completion.first_content() {
        return Ok(content.trim().to_string());
    }
    let detail = match completion.choices.first() {
        None => "response contained no choices".to_string(),
        Some(choice) => match choice.message.refusal.as_deref() {
            Some(refusal) => format!("first choice has no content (refusal: {refusal})"),
            None => "first choice has no content".to_string(),
        },
    };
    Err(CompletionFailure::Unexpected(Error::unexpected_response(detail)))
}

/// Run [`complete_request`] and render its outcome as the text shown to the
/// operator.
///
/// Failures are counted and become the reply; they never propagate.
pub async fn reply_to<S>(service: &S, params: ChatCompletionCreateParams) -> String
where
    S: CompletionService + ?Sized,
{
    match complete_request(service, params).await {
        Ok(text) => text,
        Err(failure) => {
            if failure.is_service() {
                CHAT_SERVICE_ERRORS.click();
            } else {
                CHAT_UNEXPECTED_ERRORS.click();
            }
            let err = failure.error();
            tracing::debug!(
                error = %err,
                status = ?err.status_code(),
                request_id = ?err.request_id(),
                retryable = err.is_retryable(),
                "completion failed"
            );
            failure.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;
    use crate::types::{ChatCompletion, ChatMessage, Choice, FinishReason, KnownModel, Role};

    struct FixedService {
        response: Result<ChatCompletion>,
        seen: Mutex<Vec<ChatCompletionCreateParams>>,
    }

    impl FixedService {
        fn new(response: Result<ChatCompletion>) -> Self {
            Self {
                response,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionService for FixedService {
        async fn create_chat_completion(
            &self,
            params: ChatCompletionCreateParams,
        ) -> Result<ChatCompletion> {
            self.seen.lock().unwrap().push(params);
            self.response.clone()
        }
    }

    fn completion_with(messages: Vec<ChatMessage>) -> ChatCompletion {
        ChatCompletion {
            id: "chatcmpl-1".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gpt-3.5-turbo".to_string(),
            choices: messages
                .into_iter()
                .enumerate()
                .map(|(index, message)| Choice {
                    index: index as u32,
                    message,
                    finish_reason: Some(FinishReason::Stop),
                })
                .collect(),
            usage: None,
        }
    }

    fn model() -> Model {
        Model::Known(KnownModel::Gpt35Turbo)
    }

    #[tokio::test]
    async fn success_trims_first_choice() {
        let service = FixedService::new(Ok(completion_with(vec![
            ChatMessage::assistant(" Hi there! "),
            ChatMessage::assistant("ignored"),
        ])));
        let reply = complete(&service, &model(), "Hello").await.unwrap();
        assert_eq!(reply, "Hi there!");
    }

    #[tokio::test]
    async fn request_has_one_user_message_with_exact_text() {
        let service = FixedService::new(Ok(completion_with(vec![ChatMessage::assistant("ok")])));
        complete(&service, &model(), "  spaced prompt ").await.unwrap();

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, model());
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].role, Role::User);
        assert_eq!(
            seen[0].messages[0].content.as_deref(),
            Some("  spaced prompt ")
        );
    }

    #[tokio::test]
    async fn prepared_request_is_sent_as_is() {
        let service = FixedService::new(Ok(completion_with(vec![ChatMessage::assistant("ok")])));
        let params = ChatCompletionCreateParams::single_turn(model(), "Hello")
            .with_temperature(0.2)
            .with_max_tokens(64);
        let reply = reply_to(&service, params.clone()).await;
        assert_eq!(reply, "ok");
        assert_eq!(service.seen.lock().unwrap().as_slice(), &[params]);
    }

    #[tokio::test]
    async fn service_error_reply() {
        let service = FixedService::new(Err(Error::authentication("Incorrect API key provided")));
        let params = ChatCompletionCreateParams::single_turn(model(), "Hello");
        let reply = reply_to(&service, params).await;
        assert_eq!(
            reply,
            "OpenAI API returned an error: Authentication error: Incorrect API key provided"
        );
    }

    #[tokio::test]
    async fn transport_error_reply() {
        let service = FixedService::new(Err(Error::connection("connection refused", None)));
        let params = ChatCompletionCreateParams::single_turn(model(), "Hello");
        let reply = reply_to(&service, params).await;
        assert_eq!(
            reply,
            "An unexpected error occurred: Connection error: connection refused"
        );
    }

    #[tokio::test]
    async fn empty_choices_are_unexpected() {
        let service = FixedService::new(Ok(completion_with(Vec::new())));
        let failure = complete(&service, &model(), "Hello").await.unwrap_err();
        assert!(!failure.is_service());
        assert_eq!(
            failure.to_string(),
            "An unexpected error occurred: Unexpected response: response contained no choices"
        );
    }

    #[test]
    fn null_content_is_unexpected() {
        let mut refused = ChatMessage::assistant("");
        refused.content = None;
        refused.refusal = Some("no".to_string());
        let service = FixedService::new(Ok(completion_with(vec![refused])));
        let failure =
            tokio_test::block_on(complete(&service, &model(), "Hello")).unwrap_err();
        assert!(matches!(failure, CompletionFailure::Unexpected(_)));
        assert!(failure.to_string().contains("refusal: no"));
    }
}
