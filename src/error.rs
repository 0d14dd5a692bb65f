/// Error types for Picx
///
/// Failures from the GraphQL endpoint, the object store, and form
/// validation all converge on `AppError`. No error is retried and no error
/// is fatal to the process: page handlers catch failures at the point of
/// the originating user action and re-render with a notification, while
/// anything that escapes a handler is converted to an HTTP response here.
use actix_web::{error::ResponseError, http::header::ContentType, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

/// Result type for picx operations
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level error object from a GraphQL response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub path: Option<serde_json::Value>,
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client-side form constraint violation
    #[error("{0}")]
    Validation(String),

    /// Transport failure talking to the GraphQL endpoint or user pool
    #[error("Network error: {0}")]
    Network(String),

    /// The GraphQL endpoint returned partial or full errors
    #[error("GraphQL error: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlErrorEntry>),

    /// Object store upload or access failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing or invalid session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_messages(errors: &[GraphQlErrorEntry]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Network(_) | AppError::GraphQl(_) | AppError::Storage(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(crate::render::error_page(status, &self.to_string()))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> GraphQlErrorEntry {
        GraphQlErrorEntry {
            message: message.to_string(),
            error_type: None,
            path: None,
        }
    }

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Network("down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::GraphQl(vec![entry("denied")]).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Storage("put failed".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Unauthorized("no session".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn graphql_errors_join_field_messages() {
        let err = AppError::GraphQl(vec![entry("first"), entry("second")]);
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }

    #[test]
    fn error_entries_deserialize_from_appsync_shape() {
        let raw = serde_json::json!({
            "message": "Not Authorized to access createPost on type Mutation",
            "errorType": "Unauthorized",
            "path": ["createPost"]
        });

        let entry: GraphQlErrorEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.error_type.as_deref(), Some("Unauthorized"));
        assert!(entry.message.contains("createPost"));
    }
}
