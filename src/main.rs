//! Maintenance responder binary.
//!
//! ```text
//! RETRY_AFTER="Mon, 02 Jan 2006 15:04:05 GMT" RUST_LOG=debug cargo run
//! curl -i http://localhost:8080/anything
//! ```

use std::process::ExitCode;

use maintenance::config::{ProcessEnv, Settings};
use maintenance::retry_after::{self, Configured};
use maintenance::{Maintenance, Server};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::from_source(&ProcessEnv) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match retry_after::inspect(&ProcessEnv) {
        Configured::Valid(value) => info!(retry_after = %value, "advertising Retry-After"),
        Configured::Unset => info!("RETRY_AFTER unset, Retry-After will be omitted"),
        Configured::Invalid(raw) => {
            warn!(retry_after = %raw, "RETRY_AFTER is not an HTTP-date, Retry-After will be omitted")
        }
    }
    info!(cors = settings.enable_cors, "starting");

    let app = Maintenance::new(ProcessEnv).cors(settings.enable_cors);

    if let Err(e) = Server::bind(settings.bind_addr).serve(app).await {
        error!(addr = %settings.bind_addr, "server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
