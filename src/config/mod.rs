//! Configuration management for portsweep.
//!
//! Settings are read from an optional JSON file in the XDG config
//! directory or from a path given on the command line.

mod settings;

pub use settings::{ColorChoice, Paths, ScanSettings};
