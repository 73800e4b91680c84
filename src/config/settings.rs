//! Scan settings and their on-disk location.
//!
//! Settings are optional: with no file present every value has a default.
//! Nothing is ever written to disk.

use crate::banner::BANNER_BYTES_LIMIT;
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the configuration directory without creating it.
    pub fn discover() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("", "", "portsweep").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// When to color the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Tunables for a scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Connect timeout per port in milliseconds.
    pub connect_timeout_ms: u64,
    /// Banner read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Maximum banner bytes read per open port.
    pub banner_max_bytes: usize,
    /// Worker limit for ordinary ranges.
    pub default_workers: usize,
    /// Worker limit for ranges wider than `wide_range_threshold`.
    pub wide_workers: usize,
    /// Port count above which `wide_workers` applies.
    pub wide_range_threshold: usize,
    /// Maximum banner characters shown in the report.
    pub banner_width: usize,
    /// Report coloring.
    pub color: ColorChoice,
    /// Services database in `/etc/services` format.
    pub services_file: Option<PathBuf>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1000,
            read_timeout_ms: 1000,
            banner_max_bytes: 1024,
            default_workers: 100,
            wide_workers: 200,
            wide_range_threshold: 1000,
            banner_width: 60,
            color: ColorChoice::Auto,
            services_file: None,
        }
    }
}

impl ScanSettings {
    /// Load settings from the default location, or defaults if absent.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load from `path` when given, otherwise from the default location.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Reject values that would make a scan impossible.
    pub fn validate(&self) -> ConfigResult<()> {
        let nonzero: [(&'static str, u64); 6] = [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("read_timeout_ms", self.read_timeout_ms),
            ("banner_max_bytes", self.banner_max_bytes as u64),
            ("banner_width", self.banner_width as u64),
            ("default_workers", self.default_workers as u64),
            ("wide_workers", self.wide_workers as u64),
        ];

        for (field, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.banner_max_bytes > BANNER_BYTES_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "banner_max_bytes",
                reason: format!("must be at most {}", BANNER_BYTES_LIMIT),
            });
        }
        Ok(())
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Banner read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Worker limit for a range of `port_count` ports.
    pub fn worker_limit_for(&self, port_count: usize) -> usize {
        if port_count > self.wide_range_threshold {
            self.wide_workers
        } else {
            self.default_workers
        }
    }
}
