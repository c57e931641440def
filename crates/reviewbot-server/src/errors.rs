//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use reviewbot_core::{DomainError, ErrorKind};
use thiserror::Error;
use tracing::error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Could not set up metrics: {}", message)]
    MetricsError { message: String },

    #[error("Invalid request format: {}", message)]
    InvalidRequest { message: String },

    #[error("Request did not complete in {} ms", timeout_ms)]
    Timeout { timeout_ms: u64 },

    #[error(transparent)]
    DomainError {
        #[from]
        source: DomainError,
    },
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ServerError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ServerError::DomainError { source } => match source.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::InvalidOperand => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, message = "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status_code).json(serde_json::json!({ "error": message }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[test]
    fn status_codes() {
        let status = |e: DomainError| ServerError::from(e).status_code();

        assert_eq!(status(DomainError::UnknownUser { id: 1 }), StatusCode::NOT_FOUND);
        assert_eq!(
            status(DomainError::AlreadyMerged { pull_request_id: 1 }),
            StatusCode::CONFLICT
        );
        assert_eq!(status(DomainError::TeamBusy { team_id: 1 }), StatusCode::CONFLICT);
        assert_eq!(
            status(DomainError::NotAssignedReviewer {
                pull_request_id: 1,
                user_id: 2
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(DomainError::ReassignmentFailed { failures: 2 }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Timeout { timeout_ms: 10 }.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let response = ServerError::from(DomainError::ReassignmentFailed { failures: 2 })
            .error_response();
        let body = to_bytes(response.into_body()).await.unwrap();

        assert_eq!(&body[..], br#"{"error":"Internal server error"}"#);
    }

    #[tokio::test]
    async fn business_errors_keep_their_message() {
        let response =
            ServerError::from(DomainError::UnknownPullRequest { id: 3 }).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();

        assert_eq!(&body[..], br#"{"error":"Unknown pull request #3"}"#);
    }
}
