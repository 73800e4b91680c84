//! # portsweep - A Concurrent TCP Port Scanner
//!
//! portsweep determines which ports of a host accept TCP connections,
//! names the likely service, and captures whatever banner the service
//! sends on connect.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() {
//!     let results = portsweep::scan("127.0.0.1", 1, 1024, 100).await;
//!
//!     for result in results.iter().filter(|r| r.is_open()) {
//!         println!("{} {} {}", result.port, result.service, result.banner);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`resolver`] - hostname resolution with fall-through to the input
//! - [`scanner`] - the TCP prober, the worker pool, and the scan coordinator
//! - [`banner`] - bounded banner reads on open connections
//! - [`services`] - port to service-name lookup
//! - [`output`] - progress reporting and the result table
//! - [`config`] - optional settings file
//! - [`error`] - error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ScanError};
pub use scanner::{scan, Coordinator, PortStatus, ProbeResult, Prober, ScanSession, TcpProber};
pub use types::{PortRange, ScanTarget};
