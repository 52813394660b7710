use crate::ports::DnsResolver;
use hickory_proto::op::{Message, MessageType};
use rootwalk_domain::{DomainError, RootHints};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Turns one inbound client datagram into the datagram to send back.
///
/// Only the first question is answered. An `Err` means nothing must be sent;
/// the client is left to time out and retry.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    root_hints: RootHints,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, root_hints: RootHints) -> Self {
        Self {
            resolver,
            root_hints,
        }
    }

    pub fn root_hints(&self) -> &RootHints {
        &self.root_hints
    }

    pub async fn execute(&self, packet: &[u8], client: SocketAddr) -> Result<Vec<u8>, DomainError> {
        let start = Instant::now();

        let request = Message::from_vec(packet)
            .map_err(|e| DomainError::MalformedQuery(e.to_string()))?;

        let question = request
            .queries()
            .first()
            .cloned()
            .ok_or(DomainError::MissingQuestion)?;

        if request.queries().len() > 1 {
            debug!(
                client = %client,
                questions = request.queries().len(),
                "Multi-question query, answering the first only"
            );
        }

        info!(
            domain = %question.name(),
            record_type = ?question.query_type(),
            client = %client,
            "DNS query received"
        );

        let mut response = match self
            .resolver
            .resolve(self.root_hints.candidates(), &question)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    domain = %question.name(),
                    client = %client,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Resolution failed, dropping query"
                );
                return Err(e);
            }
        };

        let mut header = *response.header();
        header
            .set_id(request.id())
            .set_message_type(MessageType::Response);
        response.set_header(header);
        response.set_recursion_desired(request.recursion_desired());
        if response.queries().is_empty() {
            response.add_query(question.clone());
        }

        let bytes = response
            .to_vec()
            .map_err(|e| DomainError::EncodeFailed(e.to_string()))?;

        debug!(
            domain = %question.name(),
            client = %client,
            rcode = ?response.response_code(),
            answers = response.answers().len(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Response ready"
        );

        Ok(bytes)
    }
}
