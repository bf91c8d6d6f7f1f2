//! Permissive CORS.
//!
//! Every response allows any origin, any request header and the usual
//! methods. Non-preflight responses additionally expose `Retry-After` so
//! browser code on another origin can read it.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS,
};

use crate::response::{Response, ResponseBuilder};

pub const ALLOW_HEADERS: &str = "*";
pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const EXPOSE_HEADERS: &str = "Retry-After";

/// Adds the three `Access-Control-Allow-*` headers.
pub fn allow(builder: ResponseBuilder) -> ResponseBuilder {
    builder
        .header(ACCESS_CONTROL_ALLOW_HEADERS.as_str(), ALLOW_HEADERS)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN.as_str(), ALLOW_ORIGIN)
        .header(ACCESS_CONTROL_ALLOW_METHODS.as_str(), ALLOW_METHODS)
}

/// Lets cross-origin scripts read `Retry-After`.
pub fn expose_retry_after(builder: ResponseBuilder) -> ResponseBuilder {
    builder.header(ACCESS_CONTROL_EXPOSE_HEADERS.as_str(), EXPOSE_HEADERS)
}

/// `200 OK`, no body, allow headers only.
pub fn preflight() -> Response {
    allow(Response::builder()).no_body()
}
