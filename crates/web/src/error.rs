use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::{dto::common::ErrorResponse, error::StorageError, validation::FieldErrors};

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(FieldErrors),
    BadRequest(String),
    NotFound(String),
}

impl WebError {
    pub fn workout_not_found(id: &str) -> Self {
        Self::NotFound(format!("Workout not found with id of {}", id))
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = match self {
            Self::Storage(StorageError::NotFound) => ErrorResponse::new("Resource not found"),
            Self::Storage(StorageError::Validation(errors)) | Self::Validation(errors) => {
                ErrorResponse::many(errors.messages())
            }
            Self::Storage(StorageError::ConstraintViolation(constraint)) => {
                tracing::warn!("Constraint violation: {}", constraint);
                ErrorResponse::new("Invalid workout")
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ErrorResponse::new("Server Error")
            }
            Self::BadRequest(msg) => ErrorResponse::new(msg),
            Self::NotFound(msg) => ErrorResponse::new(msg),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<FieldErrors> for WebError {
    fn from(error: FieldErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use storage::dto::common::ErrorMessage;
    use storage::validation::constraint_errors;

    async fn render(error: WebError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_variants() {
        let (status, body) = render(WebError::Storage(StorageError::NotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body.success);

        let (status, body) = render(WebError::workout_not_found("abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body.error,
            ErrorMessage::Single("Workout not found with id of abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_storage_failures_hide_details() {
        let (status, body) =
            render(WebError::Storage(StorageError::Database(sqlx::Error::PoolClosed))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, ErrorMessage::Single("Server Error".to_string()));
    }

    #[tokio::test]
    async fn test_constraint_violation_is_a_client_error() {
        let (status, body) = render(WebError::Storage(StorageError::ConstraintViolation(
            "workouts_updated_after_created".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, ErrorMessage::Single("Invalid workout".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_check_reads_like_validation() {
        let errors = constraint_errors("workouts_duration_range").unwrap();
        let (status, body) = render(WebError::Storage(StorageError::Validation(errors))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error,
            ErrorMessage::Many(vec![
                "Duration must be between 1 and 1440 minutes (24 hours)".to_string()
            ])
        );
    }
}
