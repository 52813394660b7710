pub mod udp;

use async_trait::async_trait;
use hickory_proto::op::{Message, Query};
use rootwalk_domain::{DomainError, ServerCandidates};

pub use udp::UdpTransport;

/// One iterative query against the first usable server in `candidates`.
///
/// Implementations never retry against another candidate once the query has
/// been sent; any failure after that point is returned as-is.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn query(
        &self,
        candidates: &ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
