use std::fmt;

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 64;

/// Correlation id for one HTTP exchange. Always safe to log and to echo as a header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts a caller-supplied id of 1 to 64 characters drawn from
    /// `[A-Za-z0-9._-]`. Anything else is not trusted into logs.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_REQUEST_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(raw) = headers.get(REQUEST_ID_HEADER) else {
            return Self::mint();
        };
        match raw.to_str().ok().and_then(Self::parse) {
            Some(id) => id,
            None => {
                let minted = Self::mint();
                tracing::debug!(replacement = %minted, "Ignoring malformed request id");
                minted
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags each request with a [`RequestId`], runs it inside a span carrying
/// that id, and returns the id to the caller.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "http",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        status = tracing::field::Empty,
    );

    let mut response = next.run(request).instrument(span.clone()).await;
    span.record("status", response.status().as_u16());

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
