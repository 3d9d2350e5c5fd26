use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for single-item responses: `{success, data, message?}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Envelope for collections: `{success, count, data}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Serializes as `{}`; the `data` of a delete acknowledgment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Single(message) => vec![message],
            Self::Many(messages) => messages,
        }
    }
}

/// Body shared by every failed request: `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorMessage::Single(message.into()),
        }
    }

    pub fn many(messages: Vec<String>) -> Self {
        Self {
            success: false,
            error: ErrorMessage::Many(messages),
        }
    }
}
