use axum::body::Body;
use bytes::Bytes;
use http::{Request, Response};

use common::prelude::Adapter;

use crate::error::AdapterError;

/// Default cap on bodies collected from axum, in bytes
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Adapter for `axum` handlers and middleware
#[derive(Debug, Clone, Copy)]
pub struct AxumAdapter {
    body_limit: usize,
}

impl Default for AxumAdapter {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Adapter for AxumAdapter {
    type Body = Body;

    fn string_to_stream(&self, input: Bytes) -> Self::Body {
        Body::from(input)
    }
}

impl AxumAdapter {
    pub fn with_body_limit(body_limit: usize) -> Self {
        Self { body_limit }
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Buffer an incoming request so it can be verified or opened
    ///
    /// Bodies larger than the configured limit fail with
    /// [`AdapterError::Body`].
    pub async fn collect_request(
        &self,
        request: Request<Body>,
    ) -> Result<Request<Bytes>, AdapterError> {
        let (parts, body) = request.into_parts();
        let bytes = axum::body::to_bytes(body, self.body_limit).await?;
        tracing::debug!(method = %parts.method, body_len = bytes.len(), "collected axum request");
        Ok(Request::from_parts(parts, bytes))
    }

    /// Buffer a response, e.g. one produced by an inner service
    pub async fn collect_response(
        &self,
        response: Response<Body>,
    ) -> Result<Response<Bytes>, AdapterError> {
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, self.body_limit).await?;
        Ok(Response::from_parts(parts, bytes))
    }
}
