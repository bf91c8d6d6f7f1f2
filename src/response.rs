//! Outgoing HTTP response type.
//!
//! The handler builds a [`Response`] and returns it. The server turns it into
//! a hyper response at the very end of dispatch.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use tracing::error;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use maintenance::Response;
///
/// Response::builder()
///     .status(StatusCode::SERVICE_UNAVAILABLE)
///     .header("retry-after", "Mon, 02 Jan 2006 15:04:05 GMT")
///     .text("down for maintenance");
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// Starts a `200 OK` response.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns the first value set for `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper representation.
    ///
    /// A header that is not a legal HTTP name/value pair turns the whole
    /// response into a bare `500 Internal Server Error`.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(res) => res,
            Err(e) => {
                error!("dropping malformed response: {e}");
                let mut res = http::Response::new(Full::default());
                *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                res
            }
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Headers are
/// emitted in insertion order. Terminated by [`text`](Self::text) or
/// [`no_body`](Self::no_body).
#[derive(Debug)]
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        let mut headers = vec![("content-type".to_owned(), TEXT_PLAIN.to_owned())];
        headers.extend(self.headers);
        Response { body: body.into().into_bytes(), headers, status: self.status }
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }
}
