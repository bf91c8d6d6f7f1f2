//! Cross-cutting response decoration.
//!
//! - [`cors`] — permissive CORS headers and the `OPTIONS` preflight answer

pub mod cors;
