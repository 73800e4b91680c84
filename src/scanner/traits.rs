//! Prober trait and per-port result types.
//!
//! The coordinator only depends on the `Prober` trait, so the connection
//! mechanism can be swapped out (for example in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// A connection was established.
    Open,
    /// The connection attempt failed for any reason (refused, timed out,
    /// unreachable, ...).
    Closed,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Result of probing a single port. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The port number that was probed.
    pub port: u16,
    /// Whether the port accepted a connection.
    pub status: PortStatus,
    /// Service name from the port table, empty if unknown or closed.
    pub service: String,
    /// Banner sent by the service, empty if none or closed.
    pub banner: String,
}

impl ProbeResult {
    /// A closed port: service and banner are always empty.
    pub fn closed(port: u16) -> Self {
        Self {
            port,
            status: PortStatus::Closed,
            service: String::new(),
            banner: String::new(),
        }
    }

    /// An open port with whatever service name and banner were found.
    pub fn open(port: u16, service: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            port,
            status: PortStatus::Open,
            service: service.into(),
            banner: banner.into(),
        }
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Trait for single-port probe implementations.
///
/// Implementations must absorb every error: a failed probe is reported as
/// a closed port, never as an error.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port on `address`.
    async fn probe(&self, address: &str, port: u16) -> ProbeResult;
}
