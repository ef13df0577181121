use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, CompletionUsage};

/// The reason the model stopped generating tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model hit a natural stop point or a stop sequence.
    Stop,
    /// The token limit was reached.
    Length,
    /// The model called a tool.
    ToolCalls,
    /// Content was omitted by the content filter.
    ContentFilter,
    /// The model called a function (legacy).
    FunctionCall,
    /// A reason this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One generated alternative in a chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Position of this choice in the list.
    #[serde(default)]
    pub index: u32,

    /// The generated message.
    pub message: ChatMessage,

    /// Why generation stopped, if reported.
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// A chat completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Unique identifier for the completion.
    #[serde(default)]
    pub id: String,

    /// Object type, always `chat.completion`.
    #[serde(default)]
    pub object: String,

    /// Unix timestamp (seconds) of creation.
    #[serde(default)]
    pub created: u64,

    /// The model that produced the completion.
    #[serde(default)]
    pub model: String,

    /// Generated alternatives.
    pub choices: Vec<Choice>,

    /// Token usage, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

impl ChatCompletion {
    /// Returns the content of the first choice, if there is one and it has content.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;

    #[test]
    fn completion_deserialization() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo-0125",
            "system_fingerprint": "fp_44709d6fcb",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": " Hi there! "},
                "logprobs": null,
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        }))
        .unwrap();

        assert_eq!(completion.id, "chatcmpl-123");
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].message.role, Role::Assistant);
        assert_eq!(completion.choices[0].finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.first_content(), Some(" Hi there! "));
        assert_eq!(completion.usage, Some(CompletionUsage::new(9, 12)));
    }

    #[test]
    fn first_content_without_choices() {
        let completion: ChatCompletion =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(completion.first_content(), None);
    }

    #[test]
    fn unknown_finish_reason() {
        let choice: Choice = serde_json::from_value(json!({
            "message": {"role": "assistant", "content": "x"},
            "finish_reason": "something_new"
        }))
        .unwrap();
        assert_eq!(choice.finish_reason, Some(FinishReason::Unknown));
    }
}
