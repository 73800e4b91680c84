//! TCP connect prober.
//!
//! Performs a full TCP handshake per port using the operating system's
//! socket API. No elevated privileges are required.

use crate::banner::{read_banner, BANNER_TIMEOUT, MAX_BANNER_SIZE};
use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{ProbeResult, Prober};
use crate::services::ServiceTable;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Default connect timeout per port.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect prober.
///
/// Every probe opens at most one socket. The socket is owned by the probe
/// call and dropped before it returns, whether or not a banner was read.
#[derive(Debug, Clone)]
pub struct TcpProber {
    connect_timeout: Duration,
    read_timeout: Duration,
    banner_max_bytes: usize,
    services: Arc<ServiceTable>,
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(CONNECT_TIMEOUT, BANNER_TIMEOUT)
    }
}

impl TcpProber {
    /// Create a new prober backed by the builtin service table.
    ///
    /// # Arguments
    /// * `connect_timeout` - Upper bound on each connection attempt
    /// * `read_timeout` - Upper bound on the banner read of an open port
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
            banner_max_bytes: MAX_BANNER_SIZE,
            services: Arc::new(ServiceTable::builtin()),
        }
    }

    /// Set the maximum number of banner bytes read.
    pub fn with_banner_max_bytes(mut self, max_bytes: usize) -> Self {
        self.banner_max_bytes = max_bytes;
        self
    }

    /// Use a different service table.
    pub fn with_services(mut self, services: ServiceTable) -> Self {
        self.services = Arc::new(services);
        self
    }

    /// Get the configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Get the configured banner read timeout.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Attempt to connect, classifying the failure.
    async fn attempt_connect(&self, address: &str, port: u16) -> ScanResult<TcpStream> {
        match timeout(self.connect_timeout, TcpStream::connect((address, port))).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                Err(ScanError::ConnectionRefused)
            }
            Ok(Err(e)) if e.kind() == ErrorKind::TimedOut => Err(ScanError::Timeout),
            Ok(Err(e)) => {
                let error_str = e.to_string().to_lowercase();
                if error_str.contains("unreachable") {
                    if error_str.contains("host") {
                        Err(ScanError::HostUnreachable)
                    } else {
                        Err(ScanError::NetworkUnreachable(e.to_string()))
                    }
                } else {
                    Err(ScanError::ConnectionFailed {
                        port,
                        reason: e.to_string(),
                    })
                }
            }
            Err(_) => Err(ScanError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: &str, port: u16) -> ProbeResult {
        match self.attempt_connect(address, port).await {
            Ok(mut stream) => {
                let service = self.services.lookup(port).unwrap_or_default().to_string();
                let banner =
                    read_banner(&mut stream, self.read_timeout, self.banner_max_bytes).await;
                drop(stream);

                trace!(port, %service, "port open");
                ProbeResult::open(port, service, banner)
            }
            Err(e) => {
                trace!(port, reason = %e, "port closed");
                ProbeResult::closed(port)
            }
        }
    }
}
