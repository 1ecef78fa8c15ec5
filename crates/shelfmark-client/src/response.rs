//! Uniform response envelope.

use serde::{Deserialize, Serialize};

/// Severity of an advisory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Informational note.
    Info,
    /// Degraded or unsupported request; the payload is still returned.
    Error,
}

/// Non-fatal annotation attached to a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Severity.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Free text.
    pub content: String,
}

impl ApiMessage {
    /// Creates an info message.
    #[must_use]
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            content: content.into(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            content: content.into(),
        }
    }

    /// Returns true for [`MessageKind::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Payload plus advisory messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Result of the operation.
    pub data: T,
    /// Messages in the order they were raised.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ApiMessage>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload with no messages.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            data,
            messages: Vec::new(),
        }
    }

    /// Wraps a payload with messages.
    #[must_use]
    pub const fn with_messages(data: T, messages: Vec<ApiMessage>) -> Self {
        Self { data, messages }
    }

    /// Appends a message.
    #[must_use]
    pub fn with_message(mut self, message: ApiMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Transforms the payload, keeping the messages.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            messages: self.messages,
        }
    }

    /// Returns true if any message is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(ApiMessage::is_error)
    }
}
