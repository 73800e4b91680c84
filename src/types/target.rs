//! Scan target as given by the user and as resolved for connecting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scan target, resolved once per scan and immutable afterwards.
///
/// `resolved_address` is the numeric address when resolution succeeded and
/// the original input otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub host: String,
    /// The address connections are made against.
    pub resolved_address: String,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(host: impl Into<String>, resolved_address: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            resolved_address: resolved_address.into(),
        }
    }

    /// Resolve `host` and build the target from the answer.
    pub async fn resolve(host: &str) -> Self {
        let resolved = crate::resolver::resolve(host).await;
        Self::new(host, resolved)
    }

    /// Whether resolution produced something other than the input.
    pub fn was_resolved(&self) -> bool {
        self.host != self.resolved_address
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_resolved() {
            write!(f, "{} ({})", self.host, self.resolved_address)
        } else {
            write!(f, "{}", self.host)
        }
    }
}
