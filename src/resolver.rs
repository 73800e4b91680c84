//! Hostname resolution.
//!
//! Resolution never fails from the caller's point of view: if the name
//! cannot be resolved the input is handed back unchanged, and connections
//! against it fail per port later on.

use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Resolve a hostname or IP address string to a numeric address string.
///
/// Numeric input is returned as-is without a lookup. Otherwise exactly one
/// lookup is made and the first answer is returned.
pub async fn resolve(host: &str) -> String {
    if host.parse::<IpAddr>().is_ok() {
        return host.to_string();
    }

    match lookup_first(host).await {
        Some(ip) => {
            debug!(host, %ip, "resolved target");
            ip.to_string()
        }
        None => host.to_string(),
    }
}

async fn lookup_first(host: &str) -> Option<IpAddr> {
    let resolver = build_resolver();

    match resolver.lookup_ip(host).await {
        Ok(response) => {
            let first = response.iter().next();
            if first.is_none() {
                debug!(host, "no addresses found, using input as-is");
            }
            first
        }
        Err(e) => {
            debug!(host, error = %e, "resolution failed, using input as-is");
            None
        }
    }
}

/// Build a resolver from the system configuration, falling back to the
/// library defaults when it cannot be read. Retries are disabled.
fn build_resolver() -> TokioAsyncResolver {
    let (config, mut opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            debug!(error = %e, "system resolver config unavailable, using defaults");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.attempts = 1;
    opts.use_hosts_file = true;

    TokioAsyncResolver::tokio(config, opts)
}
