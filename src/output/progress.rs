//! Progress reporting during a scan.
//!
//! The coordinator calls a `ProgressReporter` after every completed probe.
//! How (or whether) that is displayed is up to the implementation.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives scan progress from the coordinator.
pub trait ProgressReporter: Send {
    /// Called once before any probe runs.
    fn start(&mut self, _total: usize) {}

    /// Called after each completed probe.
    fn update(&mut self, completed: usize, total: usize);

    /// Called once after the last probe completed.
    fn finish(&mut self) {}
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn update(&mut self, _completed: usize, _total: usize) {}
}

/// Single-line `Scanned X/Y ports` counter on stdout, redrawn in place.
///
/// Nothing is drawn when stdout is not a terminal.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    const TEMPLATE: &'static str = "Scanned {pos}/{len} ports";

    /// Create a progress line; the bar is set up on `start`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for TerminalProgress {
    fn start(&mut self, total: usize) {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        let style =
            ProgressStyle::with_template(Self::TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn update(&mut self, completed: usize, _total: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(completed as u64);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::with_template(TerminalProgress::TEMPLATE).is_ok());
    }

    #[test]
    fn test_terminal_progress_lifecycle() {
        let mut progress = TerminalProgress::new();
        progress.update(1, 3);
        progress.start(3);
        for done in 1..=3 {
            progress.update(done, 3);
        }
        assert_eq!(progress.bar.as_ref().map(|b| b.position()), Some(3));
        progress.finish();
        assert!(progress.bar.is_none());
    }
}
