//! The maintenance handler.
//!
//! One handler, every path, every method:
//!
//! | Request | CORS on | CORS off |
//! |---|---|---|
//! | `OPTIONS` | `200`, allow headers, no body | `503` like any other method |
//! | anything else | `503`, allow + expose headers, `Retry-After` if configured | `503`, `Retry-After` if configured |

use std::sync::Arc;

use http::StatusCode;
use http::header::RETRY_AFTER;

use crate::config::ConfigSource;
use crate::middleware::cors;
use crate::request::Request;
use crate::response::Response;
use crate::retry_after;

/// Body of every non-preflight response.
pub const MESSAGE: &str = "Sorry. We're under maintenance.";

/// Answers requests while the real service is down.
///
/// `RETRY_AFTER` is looked up in the injected [`ConfigSource`] on every
/// request, so changing it in the source changes the next response.
pub struct Maintenance {
    config: Arc<dyn ConfigSource>,
    cors: bool,
}

impl Maintenance {
    /// CORS is enabled by default.
    pub fn new(config: impl ConfigSource + 'static) -> Self {
        Self { config: Arc::new(config), cors: true }
    }

    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    pub fn respond(&self, req: &Request) -> Response {
        let mut builder = Response::builder();

        if self.cors {
            if req.is_preflight() {
                return cors::preflight();
            }
            builder = cors::expose_retry_after(cors::allow(builder));
        }

        if let Some(value) = retry_after::resolve(self.config.as_ref()) {
            builder = builder.header(RETRY_AFTER.as_str(), value);
        }

        builder.status(StatusCode::SERVICE_UNAVAILABLE).text(MESSAGE)
    }
}
