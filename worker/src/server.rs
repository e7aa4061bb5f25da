use std::{io, net::SocketAddr};

use log::{info, warn};
use tokio::net::TcpListener;

use crate::{Worker, WorkerConfig};

/// The worker's listening endpoint.
///
/// Owns the bound listener for its whole lifetime, the endpoint is released when the
/// server is dropped, whichever way serving ended.
pub struct FitServer {
    listener: TcpListener,
    addr: SocketAddr,
}

impl FitServer {
    /// Binds the endpoint described by `config`.
    ///
    /// # Errors
    /// Returns `io::Error` if the address can't be resolved or bound.
    pub async fn bind(config: &WorkerConfig) -> io::Result<Self> {
        info!("binding to {}...", config.addr());
        let listener = TcpListener::bind(config.addr()).await?;
        let addr = listener.local_addr()?;
        info!("bound to {addr}");

        Ok(Self { listener, addr })
    }

    /// Returns the address the server is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves clients forever, one connection at a time.
    ///
    /// A connection that fails is logged and dropped, the server then goes back to
    /// accepting.
    ///
    /// # Errors
    /// Returns `io::Error` if accepting a connection fails.
    pub async fn serve(&self) -> io::Result<()> {
        loop {
            self.serve_one().await?;
        }
    }

    /// Accepts a single connection and serves it until the peer disconnects.
    ///
    /// # Returns
    /// The worker that served the connection, to inspect its counters.
    ///
    /// # Errors
    /// Returns `io::Error` if accepting fails, failures of the connection itself are
    /// only logged.
    pub async fn serve_one(&self) -> io::Result<Worker> {
        let (stream, peer) = self.listener.accept().await?;
        info!("client connected from {peer}");

        let (rx, tx) = stream.into_split();
        let (rx, tx) = comms::channel(rx, tx);

        let mut worker = Worker::new();
        match worker.run(rx, tx).await {
            Ok(()) => info!("client {peer} disconnected"),
            Err(e) => warn!("dropping client {peer}: {e}"),
        }

        Ok(worker)
    }
}

impl Drop for FitServer {
    fn drop(&mut self) {
        info!("closed listener at {}", self.addr);
    }
}
