//! Request-argument extraction for the video endpoints.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Query, Request};
use axum::http::{header, StatusCode};
use axum::Form;
use serde_json::Value;
use service::video::args::RawArgs;

use crate::errors::JsonApiError;

/// Arguments gathered from the query string and the body.
///
/// The body is read as JSON when the content type says so, as a URL-encoded
/// form when it is a form, and ignored otherwise. JSON keys override the query
/// string; form fields only fill keys the query string left out. An empty JSON body carries no
/// arguments; a malformed one is rejected with 400.
#[derive(Debug, Default)]
pub struct RequestArgs(pub RawArgs);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyKind::Other;
    };
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

fn store_pairs(args: &mut RawArgs, pairs: Vec<(String, String)>) {
    for (key, value) in pairs {
        args.entry(key).or_insert(Value::String(value));
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestArgs
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut args = RawArgs::new();
        if let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()) {
            store_pairs(&mut args, pairs);
        }

        match body_kind(&req) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(args));
                }
                let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
                    JsonApiError::new(StatusCode::BAD_REQUEST, format!("Failed to decode JSON object: {e}"))
                })?;
                if let Value::Object(map) = body {
                    args.extend(map);
                }
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
                store_pairs(&mut args, pairs);
            }
            BodyKind::Other => {}
        }
        Ok(Self(args))
    }
}

/// Path ids are unsigned decimal integers that fit an `i64`; anything else
/// does not name a video route and is reported as 404.
pub fn parse_video_id(raw: &str) -> Result<i64, JsonApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JsonApiError::not_found());
    }
    raw.parse::<i64>().map_err(|_| JsonApiError::not_found())
}
