//! HTTP/1 server with graceful shutdown.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::handlers::AppState;
use super::middleware;

/// The address a [`Server`] actually bound, useful when the port was 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundAddr(pub SocketAddr);

pub struct Server {
    listener: TcpListener,
    state: AppState,
    shutdown_timeout: Duration,
}

impl Server {
    pub async fn bind(addr: SocketAddr, state: AppState) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Server {
            listener,
            state,
            shutdown_timeout: Duration::from_secs(30),
        })
    }

    /// Upper bound on how long shutdown waits for open connections.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until `shutdown` resolves, then stops accepting, marks the
    /// service not ready and waits for in-flight connections to finish.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let Server {
            listener,
            state,
            shutdown_timeout,
        } = self;
        let graceful = GracefulShutdown::new();
        tokio::pin!(shutdown);

        tracing::info!(addr = %listener.local_addr()?, "listening");
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (tcp, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(err) => {
                            tracing::warn!(error = %err, "accept failed");
                            continue;
                        }
                    };
                    let io = TokioIo::new(tcp);
                    let conn_state = state.clone();
                    let conn = http1::Builder::new()
                        .timer(TokioTimer::new())
                        .serve_connection(
                            io,
                            service_fn(move |req| middleware::handle(conn_state.clone(), req)),
                        );
                    let watched = graceful.watch(conn);
                    tokio::spawn(async move {
                        if let Err(err) = watched.await {
                            tracing::debug!(%peer, error = %err, "connection error");
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received");
                    break;
                }
            }
        }

        drop(listener);
        state.set_ready(false);

        tokio::select! {
            _ = graceful.shutdown() => {
                tracing::info!("all connections closed");
            }
            _ = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    timeout = ?shutdown_timeout,
                    "timed out waiting for connections to close"
                );
            }
        }
        Ok(())
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serves on a background task; the returned handle stops it.
    pub fn spawn(self) -> io::Result<RunningServer> {
        let addr = self.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(self.run_until(async {
            // a dropped sender also means stop
            let _ = rx.await;
        }));
        Ok(RunningServer {
            addr,
            shutdown: Some(tx),
            task,
        })
    }
}

pub struct RunningServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(mut self) -> io::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.await.map_err(io::Error::other)?
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where supported.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::repository::InMemoryUserRepository;
    use std::sync::Arc;

    async fn start() -> RunningServer {
        let state = AppState::new(Arc::new(InMemoryUserRepository::seeded()));
        Server::bind("127.0.0.1:0".parse().unwrap(), state)
            .await
            .unwrap()
            .with_shutdown_timeout(Duration::from_secs(2))
            .spawn()
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let server = start().await;
        let response = reqwest::get(server.url("/api/users")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("x-request-id"));

        let users: Vec<serde_json::Value> = response.json().await.unwrap();
        assert_eq!(users.len(), 2);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_closes_listener() {
        let server = start().await;
        let url = server.url("/health");
        server.stop().await.unwrap();

        assert!(reqwest::get(url).await.is_err());
    }
}
