use bytes::Bytes;
use http::{Request, Response, Uri};

use common::prelude::Adapter;

use crate::error::AdapterError;

/// Adapter for `reqwest` clients
///
/// Outgoing protected requests become [`reqwest::Request`]s ready for
/// [`reqwest::Client::execute`]; received responses are buffered back
/// into `Response<Bytes>` so they can be verified or opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestAdapter;

impl Adapter for ReqwestAdapter {
    type Body = reqwest::Body;

    fn string_to_stream(&self, input: Bytes) -> Self::Body {
        reqwest::Body::from(input)
    }
}

impl ReqwestAdapter {
    /// Convert a protected request into a `reqwest::Request`
    pub fn into_reqwest(&self, request: Request<Bytes>) -> Result<reqwest::Request, AdapterError> {
        let request = self.adapt_request(request);
        Ok(reqwest::Request::try_from(request)?)
    }

    /// Buffer an outgoing `reqwest::Request` back into `Request<Bytes>`
    ///
    /// Only requests with an in-memory body can be collected; a streaming
    /// body fails with [`AdapterError::StreamingBody`].
    pub async fn collect_request(
        &self,
        request: &reqwest::Request,
    ) -> Result<Request<Bytes>, AdapterError> {
        let body = match request.body() {
            None => Bytes::new(),
            Some(body) => body
                .as_bytes()
                .map(Bytes::copy_from_slice)
                .ok_or(AdapterError::StreamingBody)?,
        };

        let uri: Uri = request.url().as_str().parse()?;
        let mut collected = Request::builder()
            .method(request.method().clone())
            .uri(uri)
            .version(request.version())
            .body(body)?;
        *collected.headers_mut() = request.headers().clone();
        Ok(collected)
    }

    /// Read a `reqwest::Response` to completion as `Response<Bytes>`
    pub async fn collect_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Response<Bytes>, AdapterError> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(status = %status, body_len = body.len(), "collected reqwest response");

        let mut collected = Response::builder()
            .status(status)
            .version(version)
            .body(body)?;
        *collected.headers_mut() = headers;
        Ok(collected)
    }
}
