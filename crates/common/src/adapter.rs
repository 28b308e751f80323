//! Conversion from plain bytes into an HTTP stack's body type
//!
//! The engine works on `http` messages with a [`Bytes`] body. An [`Adapter`]
//! turns those bodies into whatever body type a particular client or server
//! library expects. Integrators pick the adapter; the engine never does.

use bytes::Bytes;
use http::{Request, Response};

/// Converts bytes into an HTTP ecosystem's native body-stream type
pub trait Adapter {
    /// The native body type
    type Body;

    /// Wrap a byte string as a native body
    fn string_to_stream(&self, input: Bytes) -> Self::Body;

    /// Convert the body of a protected request
    fn adapt_request(&self, request: Request<Bytes>) -> Request<Self::Body> {
        request.map(|body| self.string_to_stream(body))
    }

    /// Convert the body of a protected response
    fn adapt_response(&self, response: Response<Bytes>) -> Response<Self::Body> {
        response.map(|body| self.string_to_stream(body))
    }
}

/// Adapter for stacks that take [`Bytes`] bodies directly
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAdapter;

impl Adapter for GenericAdapter {
    type Body = Bytes;

    fn string_to_stream(&self, input: Bytes) -> Self::Body {
        input
    }
}
