//! Central conversion of failures into the JSON error envelope
//!
//! ```json
//! {"status": "error", "message": "...", "code": 409, "request_id": "..."}
//! ```
//!
//! `request_id` comes from the task-local [`RequestContext`] installed by the
//! request-id middleware. With `debug` on, a `detail` field carries the
//! internal error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Per-request values visible to error rendering
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub debug: bool,
}

tokio::task_local! {
    pub static REQUEST_CONTEXT: RequestContext;
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `error`
    pub status: String,
    pub message: String,
    /// HTTP status code
    pub code: u16,
    pub request_id: Option<String>,
    /// Internal error text, only when debug mode is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Canned message for HTTP-level failures
    pub fn from_status(status: StatusCode) -> Self {
        let message = match status {
            StatusCode::NOT_FOUND => "The requested resource was not found",
            StatusCode::METHOD_NOT_ALLOWED => "Method not allowed for this resource",
            StatusCode::BAD_REQUEST => "Bad request",
            StatusCode::UNAUTHORIZED => "Authentication required",
            StatusCode::FORBIDDEN => "Insufficient permissions",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "Expected a JSON request body",
            StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
            StatusCode::UNPROCESSABLE_ENTITY => "Request body could not be processed",
            _ if status.is_server_error() => "An internal error occurred",
            _ => status.canonical_reason().unwrap_or("Request failed"),
        };
        Self::new(status, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = match &e {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) | DomainError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.public_message()).with_detail(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ctx = REQUEST_CONTEXT.try_with(|c| c.clone()).ok();
        let debug = ctx.as_ref().is_some_and(|c| c.debug);
        let request_id = ctx.map(|c| c.request_id);

        if self.status.is_server_error() {
            tracing::error!(
                code = self.status.as_u16(),
                detail = self.detail.as_deref().unwrap_or(""),
                "{}",
                self.message
            );
        } else {
            tracing::debug!(code = self.status.as_u16(), "{}", self.message);
        }

        let body = ErrorBody {
            status: "error".to_string(),
            message: self.message,
            code: self.status.as_u16(),
            request_id,
            detail: if debug { self.detail } else { None },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError, ctx: Option<RequestContext>) -> (StatusCode, serde_json::Value) {
        let resp = match ctx {
            Some(ctx) => REQUEST_CONTEXT.scope(ctx, async { err.into_response() }).await,
            None => err.into_response(),
        };
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::not_found("Room", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("taken".into()), StatusCode::CONFLICT),
            (
                DomainError::InvalidTransition {
                    action: "check in",
                    status: "cancelled".into(),
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                DomainError::Storage("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn envelope_carries_request_id_and_hides_detail() {
        let ctx = RequestContext {
            request_id: "req-1".into(),
            debug: false,
        };
        let err = ApiError::from(DomainError::Storage("disk I/O error".into()));
        let (status, body) = render(err, Some(ctx)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 500);
        assert_eq!(body["request_id"], "req-1");
        assert_eq!(body["message"], "An internal error occurred");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn debug_mode_exposes_detail() {
        let ctx = RequestContext {
            request_id: "req-2".into(),
            debug: true,
        };
        let err = ApiError::from(DomainError::Storage("disk I/O error".into()));
        let (_, body) = render(err, Some(ctx)).await;
        assert!(body["detail"].as_str().unwrap().contains("disk I/O error"));
    }

    #[tokio::test]
    async fn outside_a_request_the_id_is_null() {
        let (status, body) = render(ApiError::from_status(StatusCode::NOT_FOUND), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["request_id"].is_null());
        assert_eq!(body["message"], "The requested resource was not found");
    }
}
