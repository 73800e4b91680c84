//! Scanner module - coordinates probes across a bounded worker pool.
//!
//! The coordinator resolves nothing and sorts nothing: it takes an already
//! resolved target, fans one probe per port out over a [`WorkerPool`], and
//! collects results in completion order into a [`ScanSession`]. It is the
//! single consumer of the pool's completion channel, so the session needs
//! no locking.

pub mod pool;
pub mod tcp;
pub mod traits;

use crate::config::ScanSettings;
use crate::output::{ProgressReporter, SilentProgress};
use crate::services::ServiceTable;
use crate::types::{PortRange, ScanTarget};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use pool::WorkerPool;
pub use tcp::TcpProber;
pub use traits::{PortStatus, ProbeResult, Prober};

/// Lifecycle of a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    Scanning,
    Complete,
}

/// State of one scan invocation.
///
/// Results are held in completion order; use [`ScanSession::sorted_results`]
/// for presentation order.
#[derive(Debug, Clone)]
pub struct ScanSession {
    pub target: ScanTarget,
    pub range: PortRange,
    pub worker_limit: usize,
    results: Vec<ProbeResult>,
    completed: usize,
    state: SessionState,
}

impl ScanSession {
    /// Create an empty session.
    pub fn new(target: ScanTarget, range: PortRange, worker_limit: usize) -> Self {
        Self {
            target,
            range,
            worker_limit,
            results: Vec::with_capacity(range.len()),
            completed: 0,
            state: SessionState::Initialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of probes that have completed.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Number of ports in the requested range.
    pub fn total(&self) -> usize {
        self.range.len()
    }

    /// Results in completion order.
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    /// Number of open ports found.
    pub fn open_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_open()).count()
    }

    /// Consume the session, returning results sorted by port.
    pub fn sorted_results(self) -> Vec<ProbeResult> {
        let mut results = self.results;
        results.sort_by_key(|r| r.port);
        results
    }

    fn record(&mut self, result: ProbeResult) {
        self.results.push(result);
        self.completed += 1;
    }
}

/// Drives a scan over a port range with a given prober.
pub struct Coordinator<P> {
    prober: Arc<P>,
}

impl Coordinator<TcpProber> {
    /// Build a TCP coordinator from settings.
    pub fn from_settings(settings: &ScanSettings) -> Self {
        let services = match settings.services_file {
            Some(ref path) => ServiceTable::load_or_builtin(path),
            None => ServiceTable::system(),
        };

        let prober = TcpProber::new(settings.connect_timeout(), settings.read_timeout())
            .with_banner_max_bytes(settings.banner_max_bytes)
            .with_services(services);

        Self::new(prober)
    }
}

impl<P: Prober + 'static> Coordinator<P> {
    /// Create a coordinator around `prober`.
    pub fn new(prober: P) -> Self {
        Self {
            prober: Arc::new(prober),
        }
    }

    /// Probe every port of `range` on `target`, at most `worker_limit` at a time.
    ///
    /// Always runs to completion. A reversed range produces an empty,
    /// complete session without any connection attempt.
    pub async fn scan(
        &self,
        target: ScanTarget,
        range: PortRange,
        worker_limit: usize,
        progress: &mut dyn ProgressReporter,
    ) -> ScanSession {
        let mut session = ScanSession::new(target, range, worker_limit);
        let total = session.total();
        let start_time = Instant::now();

        if range.is_reversed() {
            warn!(
                start = range.start(),
                end = range.end(),
                "start port is greater than end port, nothing to scan"
            );
        }

        let pool = WorkerPool::new(worker_limit);
        debug!(
            host = %session.target,
            ports = total,
            workers = pool.worker_count(total),
            "starting scan"
        );

        session.state = SessionState::Scanning;
        progress.start(total);

        let address: Arc<str> = Arc::from(session.target.resolved_address.as_str());
        let prober = Arc::clone(&self.prober);
        let mut completions = pool.run(
            range.iter(),
            move |port| {
                let prober = Arc::clone(&prober);
                let address = Arc::clone(&address);
                async move { prober.probe(&address, port).await }
            },
            ProbeResult::closed,
        );

        while let Some(result) = completions.recv().await {
            session.record(result);
            progress.update(session.completed(), total);
        }

        progress.finish();
        session.state = SessionState::Complete;

        info!(
            host = %session.target,
            ports = total,
            open = session.open_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "scan complete"
        );

        session
    }
}

/// Scan `target` from `start_port` to `end_port` inclusive with default
/// TCP settings and no progress output.
///
/// The target is resolved once. Results are returned sorted by port.
pub async fn scan(
    target: &str,
    start_port: u16,
    end_port: u16,
    worker_limit: usize,
) -> Vec<ProbeResult> {
    let target = ScanTarget::resolve(target).await;
    let coordinator = Coordinator::from_settings(&ScanSettings::default());

    coordinator
        .scan(
            target,
            PortRange::new(start_port, end_port),
            worker_limit,
            &mut SilentProgress,
        )
        .await
        .sorted_results()
}
