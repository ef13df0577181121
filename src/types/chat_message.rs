use serde::{Deserialize, Serialize};

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions from the application.
    System,
    /// Instructions from the application on newer models.
    Developer,
    /// Text typed by the operator.
    User,
    /// Text generated by the model.
    Assistant,
    /// Output of a tool call.
    Tool,
}

/// A single message in a chat completion request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author of this message.
    pub role: Role,

    /// The text of the message.
    ///
    /// Assistant messages may carry no content (for instance, when the model
    /// refused or only produced tool calls).
    #[serde(default)]
    pub content: Option<String>,

    /// A refusal message produced by the model instead of content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

impl ChatMessage {
    /// Create a new message with the given role and text.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            refusal: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn user_message_serialization() {
        let message = ChatMessage::user("Hello");
        assert_eq!(
            to_value(&message).unwrap(),
            json!({"role": "user", "content": "Hello"})
        );
    }

    #[test]
    fn assistant_message_with_null_content() {
        let message: ChatMessage = serde_json::from_value(json!({
            "role": "assistant",
            "content": null,
            "refusal": "I can't help with that."
        }))
        .unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert!(message.content.is_none());
        assert_eq!(message.refusal.as_deref(), Some("I can't help with that."));
    }

    #[test]
    fn roles_are_lowercase() {
        assert_eq!(to_value(Role::Developer).unwrap(), json!("developer"));
        assert_eq!(to_value(Role::System).unwrap(), json!("system"));
    }
}
