use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use crate::root_hints::{RootHints, ROOT_SERVERS};

/// Iterative resolution settings.
///
/// The defaults reproduce the legacy behaviour: no read deadline, no hop
/// limit, and no transaction-ID or source-address checks. The hardening knobs
/// are opt-in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_root_hints")]
    pub root_hints: Vec<String>,

    /// Destination port for every outbound query.
    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Read deadline per query attempt. `None` waits forever.
    #[serde(default)]
    pub query_timeout_ms: Option<u64>,

    /// Upper bound on outbound queries per client request, glueless
    /// sub-resolutions included. `None` is unbounded.
    #[serde(default)]
    pub max_hops: Option<usize>,

    /// Reject responses whose ID or source address does not match the query.
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_hints: default_root_hints(),
            upstream_port: default_upstream_port(),
            query_timeout_ms: None,
            max_hops: None,
            strict_validation: false,
        }
    }
}

impl ResolverConfig {
    pub fn parsed_root_hints(&self) -> Result<RootHints, ConfigError> {
        RootHints::parse(&self.root_hints).map_err(|e| match e {
            crate::DomainError::InvalidIpAddress(hint) => ConfigError::InvalidRootHint(hint),
            other => ConfigError::Validation(other.to_string()),
        })
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.query_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    pub fn with_strict_validation(mut self) -> Self {
        self.strict_validation = true;
        self
    }

    pub fn with_upstream_port(mut self, port: u16) -> Self {
        self.upstream_port = port;
        self
    }
}

fn default_root_hints() -> Vec<String> {
    ROOT_SERVERS.iter().map(|s| s.to_string()).collect()
}

fn default_upstream_port() -> u16 {
    53
}
