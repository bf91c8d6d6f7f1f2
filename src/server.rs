//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`. No new connections are made.
//! 2. Tells every open connection to finish. Idle keep-alive connections
//!    close at once; a connection mid-request answers it first.
//! 3. Returns from [`Server::serve`] once all of them are gone, which lets
//!    `main` exit cleanly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::maintenance::Maintenance;
use crate::request::Request;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then answers every request with `app` until SIGTERM or Ctrl-C
    /// and every open connection has closed.
    ///
    /// Failing to bind is returned as [`Error::Io`]; there is nothing to
    /// serve without a listener.
    pub async fn serve(self, app: Maintenance) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        Self::run(listener, app, shutdown_signal()).await
    }

    /// Serves `app` on an already bound `listener` until `shutdown`
    /// resolves, then closes connections gracefully.
    pub async fn run<F>(listener: TcpListener, app: Maintenance, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let app = Arc::new(app);
        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();

        info!(addr = %listener.local_addr()?, "maintenance responder listening");

        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Shutdown first, so a signal stops accepting even when more
                // connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(open = tasks.len(), "shutdown signal received, closing connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let app = Arc::clone(&app);
                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let app = Arc::clone(&app);
                        async move { dispatch(app, req, remote_addr).await }
                    });

                    let conn = builder.serve_connection(TokioIo::new(stream), svc).into_owned();
                    let conn = graceful.watch(conn);

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("maintenance responder stopped");
        Ok(())
    }
}

/// Answers one request. Never fails.
async fn dispatch(
    app: Arc<Maintenance>,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let (parts, _body) = req.into_parts();
    let req = Request::new(parts);
    let response = app.respond(&req);

    debug!(
        peer = %remote_addr,
        method = %req.method(),
        path = req.path(),
        status = response.status_code().as_u16(),
        "request"
    );

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C only on non-Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
