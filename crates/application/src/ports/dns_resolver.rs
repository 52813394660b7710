use async_trait::async_trait;
use hickory_proto::op::{Message, Query};
use rootwalk_domain::{DomainError, ServerCandidates};

/// Resolves one question by walking delegations from `candidates` downward.
///
/// `Ok` carries either an answer (`MessageType::Response`, answers copied from
/// the authoritative server) or a name error (`ResponseCode::NXDomain`, no
/// answers). Every other outcome is an `Err` and aborts the client request.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(
        &self,
        candidates: ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError>;
}
