//! Unified error type.

use std::fmt;

/// The error type returned by the responder's fallible operations.
///
/// Request-level outcomes (503, 200 preflight) are expressed as
/// [`Response`](crate::Response) values, never as `Error`s. This type only
/// surfaces process-level failures: bad startup settings, binding the port.
#[derive(Debug)]
pub enum Error {
    /// Listener or connection I/O failed.
    Io(std::io::Error),
    /// A startup setting could not be parsed.
    Config { key: &'static str, message: String },
}

impl Error {
    pub(crate) fn config(key: &'static str, message: impl Into<String>) -> Self {
        Self::Config { key, message: message.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Config { key, message } => write!(f, "config: {key}: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
