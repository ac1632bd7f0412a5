//! JSON body and query extractors with structured rejections.
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies. These wrap
//! them so a malformed request surfaces as an [`ApiError`] with code
//! `MALFORMED_REQUEST`, like every other client error.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Json<T>` whose rejection is an [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::malformed_request(rejection.body_text())),
        }
    }
}

/// `Query<T>` whose rejection is an [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::malformed_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        limit: Option<usize>,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("request builds")
    }

    #[tokio::test]
    async fn test_valid_json_body() {
        let ApiJson(payload) = ApiJson::<Payload>::from_request(json_request(r#"{"title":"A"}"#), &())
            .await
            .expect("valid body");
        assert_eq!(payload.title, "A");
    }

    #[tokio::test]
    async fn test_malformed_json_is_api_error() {
        let err = ApiJson::<Payload>::from_request(json_request("{not json"), &())
            .await
            .expect_err("malformed body");
        assert_eq!(err.code, ErrorCode::MalformedRequest);
    }

    #[tokio::test]
    async fn test_bad_query_is_api_error() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/?limit=lots")
            .body(())
            .expect("request builds")
            .into_parts();
        let err = ApiQuery::<Params>::from_request_parts(&mut parts, &())
            .await
            .expect_err("non-numeric limit");
        assert_eq!(err.code, ErrorCode::MalformedRequest);
    }
}
