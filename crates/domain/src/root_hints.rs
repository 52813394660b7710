use crate::{DomainError, ServerCandidates};
use std::net::IpAddr;
use std::sync::Arc;

/// IPv4 addresses of the public root server set, in the order they are tried.
pub const ROOT_SERVERS: [&str; 13] = [
    "192.5.5.241",
    "192.112.36.4",
    "198.97.190.53",
    "192.36.148.17",
    "192.58.128.30",
    "193.0.14.129",
    "199.7.83.42",
    "202.12.27.33",
    "198.41.0.4",
    "199.9.14.201",
    "192.33.4.12",
    "199.7.91.13",
    "192.203.230.10",
];

/// Read-only bootstrap set every resolution starts from.
///
/// Cloning is cheap; the address list is shared between all in-flight
/// resolutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHints {
    addresses: Arc<[IpAddr]>,
}

impl RootHints {
    pub fn builtin() -> Self {
        let addresses: Vec<IpAddr> = ROOT_SERVERS
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        Self {
            addresses: Arc::from(addresses),
        }
    }

    pub fn from_addresses(addresses: Vec<IpAddr>) -> Result<Self, DomainError> {
        if addresses.is_empty() {
            return Err(DomainError::ConfigError(
                "root hint set cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            addresses: Arc::from(addresses),
        })
    }

    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, DomainError> {
        let addresses = entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref().trim();
                entry
                    .parse::<IpAddr>()
                    .map_err(|_| DomainError::InvalidIpAddress(entry.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_addresses(addresses)
    }

    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Fresh candidate list for the first hop of a resolution.
    pub fn candidates(&self) -> ServerCandidates {
        ServerCandidates::new(self.addresses.to_vec())
    }
}

impl Default for RootHints {
    fn default() -> Self {
        Self::builtin()
    }
}
