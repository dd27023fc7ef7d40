//! TCP listener.
//!
//! Accepts connections forever and hands each one to its own task. The
//! snapshot a connection will serve from is pinned here, at accept time;
//! afterwards the connection never looks at shared state again.

use crate::connection::handle_connection;
use crate::manager::CorpusManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Server configuration.
pub struct ServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8889".parse().unwrap(),
        }
    }
}

/// The Lantern article server.
pub struct ArticleServer {
    config: ServerConfig,
    manager: Arc<CorpusManager>,
}

impl ArticleServer {
    pub fn new(manager: Arc<CorpusManager>, config: ServerConfig) -> Self {
        Self { config, manager }
    }

    /// Returns a handle to the snapshot manager.
    pub fn manager(&self) -> Arc<CorpusManager> {
        self.manager.clone()
    }

    /// Binds the configured address and serves forever.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("lantern server listening on {}", self.config.addr);
        self.serve(listener).await
    }

    /// Serves on an already-bound listener.
    ///
    /// Accept errors are logged and the loop continues; a connection
    /// failing never stops other connections or the refresh cycle.
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!("new connection from {}", addr);
                    let snapshot = self.manager.current().await;
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, snapshot).await {
                            warn!("connection error from {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }
    }
}
