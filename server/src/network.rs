//! Server network layer: TCP listener with one task per connection.
//!
//! Each connection carries any number of framed request/response exchanges.
//! All reading and writing happens outside the arbiter's lock; the lock is
//! only held while a decoded command runs.

use crate::arbiter::Arbiter;
use crate::config::ServerConfig;
use bincode::deserialize;
use log::{debug, error, info, warn};
use shared::{read_frame, send_message, FrameError, Reason, Request, Response};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout};

/// Pause after a failed accept.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections and hands their requests to the shared [`Arbiter`].
pub struct Server {
    listener: TcpListener,
    arbiter: Arbiter,
    idle_timeout: Duration,
}

impl Server {
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            arbiter: Arbiter::new(),
            idle_timeout: config.idle_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Never returns; accept failures are logged and retried.
    pub async fn run(self) {
        let listener = &self.listener;
        serve(move || listener.accept(), self.arbiter.clone(), self.idle_timeout).await
    }
}

/// Drives `accept` forever, spawning one task per accepted connection.
async fn serve<A, F>(mut accept: A, arbiter: Arbiter, idle_timeout: Duration)
where
    A: FnMut() -> F,
    F: Future<Output = io::Result<(TcpStream, SocketAddr)>>,
{
    loop {
        let (stream, addr) = match accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Error accepting connection: {}", e);
                sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Connection from {}", addr);

        let arbiter = arbiter.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, arbiter, idle_timeout).await {
                error!("Connection {} failed: {}", addr, e);
            }
            debug!("Connection {} closed", addr);
        });
    }
}

/// Serves one connection until the peer closes it, goes idle, or breaks
/// framing. Dropping the connection never touches the shared state beyond
/// the requests that already completed.
async fn handle_connection(
    mut stream: TcpStream,
    arbiter: Arbiter,
    idle_timeout: Duration,
) -> Result<(), FrameError> {
    let addr = stream.peer_addr()?;

    loop {
        let frame = match timeout(idle_timeout, read_frame(&mut stream)).await {
            Ok(Err(FrameError::TooLarge(len))) => {
                warn!("Dropping {}: oversize frame of {} bytes", addr, len);
                return Ok(());
            }
            Ok(frame) => frame?,
            Err(_) => {
                info!("Closing idle connection from {}", addr);
                return Ok(());
            }
        };

        let Some(payload) = frame else {
            return Ok(());
        };

        let response = match deserialize::<Request>(&payload) {
            Ok(request) => arbiter.handle_request(request).await,
            Err(e) => {
                warn!("Failed to deserialize request from {}: {}", addr, e);
                Response::Failure {
                    reason: Reason::InvalidRequest,
                    state: None,
                }
            }
        };

        send_message(&mut stream, &response).await?;
    }
}
