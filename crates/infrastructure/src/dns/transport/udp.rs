//! UDP Transport for iterative DNS queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram in. Without EDNS(0) a server never sends
//! more than 512 bytes over UDP; truncated answers are passed on untouched.

use super::DnsTransport;
use crate::dns::message::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use hickory_proto::op::{Message, Query};
use rootwalk_domain::{DomainError, ResolverConfig, ServerCandidates};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size without EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 512;

/// DNS over UDP transport
pub struct UdpTransport {
    port: u16,
    timeout: Option<Duration>,
    strict_validation: bool,
}

impl UdpTransport {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            timeout: None,
            strict_validation: false,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            port: config.upstream_port,
            timeout: config.query_timeout(),
            strict_validation: config.strict_validation,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_strict(&self) -> bool {
        self.strict_validation
    }

    /// Picks the first candidate a UDP socket can be connected to.
    ///
    /// Connecting only fixes the peer address; it says nothing about whether
    /// the server will ever answer.
    async fn connect_first(
        &self,
        candidates: &ServerCandidates,
    ) -> Result<(UdpSocket, SocketAddr), DomainError> {
        for ip in candidates.iter() {
            let server = SocketAddr::new(*ip, self.port);
            let bind_addr = match ip {
                IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
                IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
            };

            let socket = match UdpSocket::bind(bind_addr).await {
                Ok(socket) => socket,
                Err(e) => {
                    debug!(server = %server, error = %e, "Failed to bind UDP socket");
                    continue;
                }
            };

            match socket.connect(server).await {
                Ok(()) => return Ok((socket, server)),
                Err(e) => {
                    debug!(server = %server, error = %e, "Candidate refused connection");
                }
            }
        }

        Err(DomainError::NoReachableServer)
    }

    async fn with_deadline<T, F>(&self, server: SocketAddr, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut)
                .await
                .map_err(|_| DomainError::QueryTimeout {
                    server: server.to_string(),
                })?,
            None => fut.await,
        }
    }

    fn check_source(&self, server: SocketAddr, from_addr: SocketAddr) -> Result<(), DomainError> {
        if from_addr == server {
            return Ok(());
        }
        if self.strict_validation {
            return Err(DomainError::UnexpectedResponseSource {
                expected: server.to_string(),
                received: from_addr.to_string(),
            });
        }
        warn!(
            expected = %server,
            received_from = %from_addr,
            "UDP response from unexpected source"
        );
        Ok(())
    }

    fn check_id(
        &self,
        query: &[u8],
        response: &[u8],
        server: SocketAddr,
    ) -> Result<(), DomainError> {
        match validate_response_id(query, response, server) {
            Ok(()) => Ok(()),
            Err(e @ DomainError::ResponseIdMismatch { .. }) if !self.strict_validation => {
                warn!(server = %server, error = %e, "Accepting response with mismatched ID");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn query(
        &self,
        candidates: &ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::NoReachableServer);
        }

        let (request, request_bytes) = MessageBuilder::build_iterative_query(question)?;
        let (socket, server) = self.connect_first(candidates).await?;

        debug!(
            server = %server,
            domain = %question.name(),
            record_type = ?question.query_type(),
            id = request.id(),
            "Outgoing DNS query"
        );

        let bytes_sent = socket
            .send(&request_bytes)
            .await
            .map_err(|e| DomainError::TransportSendFailed {
                server: server.to_string(),
                reason: e.to_string(),
            })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) = self
            .with_deadline(server, async {
                socket
                    .recv_from(&mut recv_buf)
                    .await
                    .map_err(|e| DomainError::TransportRecvFailed {
                        server: server.to_string(),
                        reason: e.to_string(),
                    })
            })
            .await?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server,
            bytes_received = bytes_received,
            "UDP response received"
        );

        self.check_source(server, from_addr)?;
        self.check_id(&request_bytes, &recv_buf, server)?;

        ResponseParser::parse(&recv_buf, &request)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

/// Compares the transaction IDs in the first two bytes of both datagrams.
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 {
        return Err(DomainError::EncodeFailed(format!(
            "query to {} shorter than a transaction ID",
            server
        )));
    }
    if response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response from {} shorter than a transaction ID",
            server
        )));
    }

    let expected = u16::from_be_bytes([query[0], query[1]]);
    let received = u16::from_be_bytes([response[0], response[1]]);
    if expected != received {
        return Err(DomainError::ResponseIdMismatch { expected, received });
    }
    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
