use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Reachability check against a single target
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// `true` iff `(ip, port)` accepted a connection. Never fails: every
    /// error collapses to `false`.
    async fn probe(&self, ip: &str, port: u16) -> bool;
}

/// TCP connect prober
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout_duration: Duration,
}

impl TcpProber {
    pub fn new(timeout_duration: Duration) -> Self {
        Self { timeout_duration }
    }
}

#[async_trait::async_trait]
impl Prober for TcpProber {
    async fn probe(&self, ip: &str, port: u16) -> bool {
        let Ok(addr) = ip.parse::<IpAddr>() else {
            trace!(ip, "Not probing unparseable address");
            return false;
        };
        let addr = SocketAddr::new(addr, port);

        connect_within(self.timeout_duration, addr, TcpStream::connect(addr)).await
    }
}

/// Drive `connect` for at most `limit`. The established stream is dropped
/// before returning, closing the socket.
async fn connect_within<T>(
    limit: Duration,
    addr: SocketAddr,
    connect: impl Future<Output = io::Result<T>>,
) -> bool {
    match timeout(limit, connect).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            trace!(%addr, error = %e, "TCP connection failed");
            false
        }
        Err(_elapsed) => {
            trace!(%addr, timeout_ms = limit.as_millis() as u64, "TCP connection timeout");
            false
        }
    }
}
