//! Core value types shared by the scanner and the reporter.

mod port;
mod target;

pub use port::PortRange;
pub use target::ScanTarget;
