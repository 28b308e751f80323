//! The HTTP message boundary
//!
//! The engine only needs four things from an HTTP message: read the values
//! of a header, set a header, read the body, and swap the body. Status,
//! method, URI and every other header are passed through untouched.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Request, Response};

/// An HTTP request or response the engine can protect and verify
pub trait HttpMessage: Sized {
    /// All values of the named header as raw bytes, in order
    ///
    /// Values are not required to be visible ASCII; a value the engine cannot
    /// decode still counts as present.
    fn header_values(&self, name: &str) -> Vec<&[u8]>;

    /// Set a header, replacing any existing values
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// The body bytes as currently held
    fn body_bytes(&self) -> &[u8];

    /// The same message with its body replaced
    fn with_body(self, body: Bytes) -> Self;
}

impl HttpMessage for Request<Bytes> {
    fn header_values(&self, name: &str) -> Vec<&[u8]> {
        self.headers()
            .get_all(name)
            .iter()
            .map(HeaderValue::as_bytes)
            .collect()
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn body_bytes(&self) -> &[u8] {
        self.body()
    }

    fn with_body(self, body: Bytes) -> Self {
        self.map(|_| body)
    }
}

impl HttpMessage for Response<Bytes> {
    fn header_values(&self, name: &str) -> Vec<&[u8]> {
        self.headers()
            .get_all(name)
            .iter()
            .map(HeaderValue::as_bytes)
            .collect()
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn body_bytes(&self) -> &[u8] {
        self.body()
    }

    fn with_body(self, body: Bytes) -> Self {
        self.map(|_| body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use http::{Method, StatusCode};

    #[test]
    fn test_request_boundary() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/items")
            .header("x-multi", "a")
            .header("x-multi", "b")
            .body(Bytes::from_static(b"hello"))
            .unwrap();

        assert_eq!(request.header_values("x-multi"), vec![b"a".as_slice(), b"b"]);
        assert_eq!(request.header_values("X-Multi"), vec![b"a".as_slice(), b"b"]);
        assert!(request.header_values("x-missing").is_empty());
        assert_eq!(request.body_bytes(), b"hello");

        let mut request = request.with_body(Bytes::from_static(b"bye"));
        request.set_header(
            HeaderName::from_static("x-multi"),
            HeaderValue::from_static("c"),
        );
        assert_eq!(request.header_values("x-multi"), vec![b"c".as_slice()]);
        assert_eq!(request.body_bytes(), b"bye");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri(), "/items");
    }

    #[test]
    fn test_response_boundary() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .body(Bytes::from_static(b"{}"))
            .unwrap();
        let response = response.with_body(Bytes::new());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.body_bytes().is_empty());
    }

    #[test]
    fn test_obs_text_values_are_kept() {
        let mut response = Response::new(Bytes::new());
        response
            .headers_mut()
            .append("x-raw", HeaderValue::from_bytes(b"\xff\xfeAAAA").unwrap());
        response
            .headers_mut()
            .append("x-raw", HeaderValue::from_static("plain"));

        assert_eq!(
            response.header_values("x-raw"),
            vec![b"\xff\xfeAAAA".as_slice(), b"plain"]
        );
    }
}
