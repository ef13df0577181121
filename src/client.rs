use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use url::Url;

use crate::credential::SessionCredential;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatCompletion, ChatCompletionCreateParams, ErrorResponse};

/// The public OpenAI endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";

/// Something that turns a chat request into a chat completion.
///
/// [`OpenAI`] is the production implementation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Create a chat completion for `params`.
    async fn create_chat_completion(
        &self,
        params: ChatCompletionCreateParams,
    ) -> Result<ChatCompletion>;
}

/// Client for the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAI {
    credential: SessionCredential,
    client: ReqwestClient,
    base_url: Url,
    timeout: Option<Duration>,
}

impl OpenAI {
    /// Create a new client against the public endpoint.
    ///
    /// No client-side timeout is applied.
    pub fn new(credential: SessionCredential) -> Result<Self> {
        Self::with_options(credential, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        credential: SessionCredential,
        base_url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_API_URL))?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            credential,
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.credential.expose()))
            .map_err(|_| {
                Error::http_client("API key contains characters not allowed in a header", None)
            })?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        error_from_status(status_code, &error_body, request_id, retry_after)
    }

    /// Send a chat completion request and wait for the full response.
    pub async fn create(&self, params: ChatCompletionCreateParams) -> Result<ChatCompletion> {
        let url = self.base_url.join("chat/completions")?;
        CLIENT_REQUESTS.click();
        tracing::debug!(%url, model = %params.model, messages = params.messages.len(), "sending chat completion request");

        let start = Instant::now();
        let result = self.send(url, &params).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match &result {
            Ok(completion) => {
                if let Some(usage) = &completion.usage {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "chat completion received"
                    );
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                tracing::debug!(error = %err, "chat completion request failed");
            }
        }
        result
    }

    async fn send(&self, url: Url, params: &ChatCompletionCreateParams) -> Result<ChatCompletion> {
        let response = self
            .client
            .post(url)
            .headers(self.default_headers()?)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        self.timeout.map(|t| t.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(e.to_string(), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait]
impl CompletionService for OpenAI {
    async fn create_chat_completion(
        &self,
        params: ChatCompletionCreateParams,
    ) -> Result<ChatCompletion> {
        self.create(params).await
    }
}

/// Parse `base` and make sure relative joins append to its path.
fn normalize_base_url(base: &str) -> Result<Url> {
    let mut base = base.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}

/// Map a non-success status and its body to an [`Error`].
fn error_from_status(
    status_code: u16,
    body: &str,
    request_id: Option<String>,
    retry_after: Option<u64>,
) -> Error {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();
    let error_type = parsed.as_ref().and_then(|e| e.error.error_type.clone());
    let error_param = parsed.as_ref().and_then(|e| e.error.param.clone());
    let error_message = parsed
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match status_code {
        400 => Error::bad_request(error_message, error_param),
        401 => Error::authentication(error_message),
        403 => Error::permission(error_message),
        404 => Error::not_found(error_message),
        429 => Error::rate_limit(error_message, retry_after),
        500 => Error::internal_server(error_message, request_id),
        502..=504 => Error::service_unavailable(error_message, retry_after),
        _ => Error::api(status_code, error_type, error_message, request_id),
    }
}
