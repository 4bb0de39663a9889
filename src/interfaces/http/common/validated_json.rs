//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Malformed
//! bodies become a 400 (or the rejection's own status) and validation
//! failures a 422, both rendered as the standard error envelope.
//!
//! `Option<ValidatedJson<T>>` yields `None` when the request carries no
//! `Content-Type`, for endpoints whose body is entirely optional.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;

pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

fn field_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    messages.sort();
    messages
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let status = rejection.status();
                let mut err = ApiError::from_status(status);
                if status == StatusCode::BAD_REQUEST {
                    err = ApiError::new(status, "Malformed JSON body");
                }
                err.with_detail(rejection.body_text()).into_response()
            }
            Self::ValidationError(errors) => {
                let messages = field_messages(&errors);
                let message = if messages.is_empty() {
                    "Validation failed".to_string()
                } else {
                    messages.join("; ")
                };
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

impl<S, T> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            return Ok(None);
        }
        <Self as FromRequest<S>>::from_request(req, state)
            .await
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct GuestBody {
        #[validate(length(min = 1, max = 10, message = "name must be 1-10 characters"))]
        name: String,
        #[validate(range(min = 1, max = 10))]
        guests: u32,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<GuestBody>) -> &'static str {
        "ok"
    }

    async fn optional_handler(body: Option<ValidatedJson<GuestBody>>) -> &'static str {
        match body {
            Some(_) => "body",
            None => "empty",
        }
    }

    async fn send_optional(req: Request<Body>) -> (StatusCode, String) {
        let app = Router::new().route("/optional", post(optional_handler));
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(body: &'static str, content_type: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/test", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let (status, _) = send(r#"{"name": "Ada", "guests": 2}"#, "application/json").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400_envelope() {
        let (status, body) = send("not json", "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Malformed JSON body");
    }

    #[tokio::test]
    async fn missing_content_type_returns_415() {
        let (status, body) = send(r#"{"name": "Ada", "guests": 2}"#, "text/plain").await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["code"], 415);
    }

    #[tokio::test]
    async fn validation_failure_returns_422_with_fields() {
        let (status, body) = send(r#"{"name": "", "guests": 0}"#, "application/json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("name: name must be 1-10 characters"));
        assert!(message.contains("guests: range"));
    }

    #[tokio::test]
    async fn optional_body_may_be_omitted() {
        let req = Request::builder()
            .method("POST")
            .uri("/optional")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send_optional(req).await, (StatusCode::OK, "empty".to_string()));

        let req = Request::builder()
            .method("POST")
            .uri("/optional")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "Ada", "guests": 2}"#))
            .unwrap();
        assert_eq!(send_optional(req).await, (StatusCode::OK, "body".to_string()));
    }

    #[tokio::test]
    async fn optional_body_is_still_validated() {
        let req = Request::builder()
            .method("POST")
            .uri("/optional")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "", "guests": 2}"#))
            .unwrap();
        let (status, _) = send_optional(req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
