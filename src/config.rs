//! Where the responder gets its settings from.
//!
//! Nothing in the request path touches `std::env` directly. The handler is
//! given a [`ConfigSource`] at construction; production passes [`ProcessEnv`],
//! tests pass a `HashMap` snapshot and never mutate the real environment.

use std::collections::HashMap;
use std::net::SocketAddr;

use crate::error::Error;

/// Retry hint advertised in the `Retry-After` header. Read on every request.
pub const RETRY_AFTER: &str = "RETRY_AFTER";
/// Listen address. Read once at startup.
pub const BIND_ADDR: &str = "BIND_ADDR";
/// `true` or `false`. Read once at startup.
pub const ENABLE_CORS: &str = "ENABLE_CORS";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Read-only key/value configuration.
///
/// Implementations must be cheap to query and safe to share across
/// connection tasks.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment. Variables that are not valid UTF-8 read as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Startup settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub enable_cors: bool,
}

impl Settings {
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, Error> {
        let bind_addr = source
            .get(BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| Error::config(BIND_ADDR, format!("{bind_addr:?}: {e}")))?;

        let enable_cors = match source.get(ENABLE_CORS) {
            None => true,
            Some(raw) => raw
                .parse::<bool>()
                .map_err(|_| Error::config(ENABLE_CORS, format!("expected true or false, got {raw:?}")))?,
        };

        Ok(Self { bind_addr, enable_cors })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let settings = Settings::from_source(&snapshot(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_addr.port(), 8080);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_source(&snapshot(&[
            (BIND_ADDR, "127.0.0.1:9000"),
            (ENABLE_CORS, "false"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert!(!settings.enable_cors);
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = Settings::from_source(&snapshot(&[(BIND_ADDR, "localhost")])).unwrap_err();
        assert!(matches!(err, Error::Config { key: BIND_ADDR, .. }));
    }

    #[test]
    fn bad_cors_flag_is_rejected() {
        let err = Settings::from_source(&snapshot(&[(ENABLE_CORS, "yes")])).unwrap_err();
        assert!(matches!(err, Error::Config { key: ENABLE_CORS, .. }));
    }

    #[test]
    fn snapshot_lookup_misses_unknown_keys() {
        let source = snapshot(&[(RETRY_AFTER, "x")]);
        assert_eq!(ConfigSource::get(&source, RETRY_AFTER).as_deref(), Some("x"));
        assert_eq!(ConfigSource::get(&source, BIND_ADDR), None);
    }
}
