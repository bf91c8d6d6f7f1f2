//! Incoming HTTP request type.

use http::{Method, Uri};

/// The head of an incoming HTTP request.
///
/// Only the method decides the response; the path is kept for logging. The
/// body is never read.
pub struct Request {
    method: Method,
    uri: Uri,
}

impl Request {
    pub(crate) fn new(parts: http::request::Parts) -> Self {
        Self { method: parts.method, uri: parts.uri }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { self.uri.path() }

    /// `true` for an `OPTIONS` request, i.e. a CORS preflight.
    pub fn is_preflight(&self) -> bool {
        self.method == Method::OPTIONS
    }
}

#[cfg(test)]
pub(crate) fn test_request(method: Method, uri: &str) -> Request {
    let (parts, ()) = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .unwrap()
        .into_parts();
    Request::new(parts)
}
