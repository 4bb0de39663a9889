//! `Path` and `Query` extractors whose rejections render as the error envelope
//!
//! Drop-in replacements for `axum::extract::{Path, Query}`.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::FromRequestParts;
use axum::http::StatusCode;

use super::ApiError;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let status = rejection.status();
        let err = if status == StatusCode::BAD_REQUEST {
            ApiError::new(status, "Invalid path parameter")
        } else {
            ApiError::from_status(status)
        };
        err.with_detail(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let status = rejection.status();
        let err = if status == StatusCode::BAD_REQUEST {
            ApiError::new(status, "Invalid query string")
        } else {
            ApiError::from_status(status)
        };
        err.with_detail(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Paging {
        #[allow(dead_code)]
        page: Option<u32>,
    }

    async fn by_id(Path(id): Path<i32>) -> String {
        id.to_string()
    }

    async fn list(Query(_paging): Query<Paging>) -> &'static str {
        "ok"
    }

    async fn call(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new()
            .route("/rooms/{id}", get(by_id))
            .route("/rooms", get(list));
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (
            status,
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
        )
    }

    #[tokio::test]
    async fn valid_path_and_query_pass_through() {
        assert_eq!(call("/rooms/7").await.0, StatusCode::OK);
        assert_eq!(call("/rooms?page=2").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn bad_path_id_is_an_enveloped_400() {
        let (status, body) = call("/rooms/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Invalid path parameter");
    }

    #[tokio::test]
    async fn bad_query_is_an_enveloped_400() {
        let (status, body) = call("/rooms?page=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Invalid query string");
    }
}
