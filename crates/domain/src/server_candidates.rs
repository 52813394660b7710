use std::fmt;
use std::net::IpAddr;

/// Ordered list of addresses to try for the next hop.
///
/// Rebuilt from scratch at every delegation step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerCandidates {
    addresses: Vec<IpAddr>,
}

impl ServerCandidates {
    pub fn new(addresses: Vec<IpAddr>) -> Self {
        Self { addresses }
    }

    pub fn extend<I: IntoIterator<Item = IpAddr>>(&mut self, addresses: I) {
        self.addresses.extend(addresses);
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.addresses.iter()
    }

    pub fn as_slice(&self) -> &[IpAddr] {
        &self.addresses
    }
}

impl From<Vec<IpAddr>> for ServerCandidates {
    fn from(addresses: Vec<IpAddr>) -> Self {
        Self::new(addresses)
    }
}

impl FromIterator<IpAddr> for ServerCandidates {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for ServerCandidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, addr) in self.addresses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", addr)?;
        }
        write!(f, "]")
    }
}
