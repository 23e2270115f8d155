use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// Recipe bodies carry free text; anything beyond this is rejected.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// JSON body extractor whose failures render as 400 Problem Details
/// instead of actix's plain-text errors.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|_| {
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        category = ?e.classify(),
                        body_size = body.len(),
                        "JSON body rejected"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, describe(&e))
                })
        })
    }
}

/// Client-safe description of a JSON failure. Field names from serde's data
/// errors are kept since they come from our own types.
fn describe(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => format!("Invalid request body: {error}"),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::FromRequest;
    use serde::Deserialize;

    use super::{describe, ValidatedJson};
    use crate::error::AppError;

    #[derive(Debug, Deserialize)]
    struct Login {
        email: String,
    }

    #[test]
    fn test_describe_missing_field_names_it() {
        let err = serde_json::from_str::<Login>("{}").unwrap_err();
        assert!(describe(&err).contains("email"));
    }

    #[test]
    fn test_describe_eof() {
        let err = serde_json::from_str::<Login>(r#"{"email": "#).unwrap_err();
        assert!(describe(&err).contains("unexpected end of input"));
    }

    #[actix_web::test]
    async fn test_parses_body() {
        let (req, mut pl) = TestRequest::post()
            .set_payload(r#"{"email":"a@b.c"}"#)
            .to_http_parts();
        let body = ValidatedJson::<Login>::from_request(&req, &mut pl)
            .await
            .unwrap();
        assert_eq!(body.email, "a@b.c");
    }

    #[actix_web::test]
    async fn test_malformed_body_is_400() {
        let (req, mut pl) = TestRequest::post().set_payload("{not json").to_http_parts();
        let err = ValidatedJson::<Login>::from_request(&req, &mut pl)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.status().as_u16(), 400);
    }
}
