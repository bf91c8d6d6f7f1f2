//! # maintenance
//!
//! A tiny HTTP responder to put in front of, or in place of, a service that
//! is down for maintenance. Every request gets:
//!
//! - `503 Service Unavailable`
//! - the body `Sorry. We're under maintenance.`
//! - `Retry-After: <HTTP-date>` when `RETRY_AFTER` holds a valid IMF-fixdate
//! - permissive CORS headers, with `OPTIONS` preflights answered `200`
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use maintenance::config::{ProcessEnv, Settings};
//! use maintenance::{Maintenance, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), maintenance::Error> {
//!     let settings = Settings::from_source(&ProcessEnv)?;
//!     let app = Maintenance::new(ProcessEnv).cors(settings.enable_cors);
//!
//!     Server::bind(settings.bind_addr).serve(app).await
//! }
//! ```
//!
//! Tests inject a `HashMap<String, String>` instead of [`config::ProcessEnv`]
//! so nothing touches the real environment.

mod error;
mod maintenance;
mod request;
mod response;
mod server;

pub mod config;
pub mod middleware;
pub mod retry_after;

pub use error::Error;
pub use maintenance::{MESSAGE, Maintenance};
pub use request::Request;
pub use response::{Response, ResponseBuilder};
pub use server::Server;
