use super::referral;
use crate::dns::message::{MessageBuilder, ResponseParser};
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use hickory_proto::op::{Message, Query};
use hickory_proto::rr::{Name, RecordType};
use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::{DomainError, RootHints, ServerCandidates};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outbound query counter shared by a resolution and all of its glueless
/// sub-resolutions.
struct HopBudget {
    used: AtomicUsize,
    limit: Option<usize>,
}

impl HopBudget {
    fn new(limit: Option<usize>) -> Self {
        Self {
            used: AtomicUsize::new(0),
            limit,
        }
    }

    fn take(&self) -> Result<usize, DomainError> {
        let hop = self.used.fetch_add(1, Ordering::Relaxed) + 1;
        match self.limit {
            Some(limit) if hop > limit => Err(DomainError::ResolutionDepthExceeded(limit)),
            _ => Ok(hop),
        }
    }
}

/// Walks the delegation tree from a candidate list down to an authoritative
/// answer.
///
/// Each hop replaces the candidate list with the servers named by the
/// referral. Glue from the additional section is preferred; without glue,
/// every delegated nameserver name is resolved from the root hints through
/// this same resolver.
pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    root_hints: RootHints,
    max_hops: Option<usize>,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, root_hints: RootHints) -> Self {
        info!(
            transport = transport.protocol_name(),
            root_servers = root_hints.len(),
            "Iterative DNS resolver created"
        );

        Self {
            transport,
            root_hints,
            max_hops: None,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    fn walk<'a>(
        &'a self,
        mut candidates: ServerCandidates,
        question: &'a Query,
        budget: &'a HopBudget,
    ) -> BoxFuture<'a, Result<Message, DomainError>> {
        async move {
            loop {
                let hop = budget.take()?;

                debug!(
                    hop = hop,
                    domain = %question.name(),
                    record_type = ?question.query_type(),
                    candidates = %candidates,
                    "Querying delegation"
                );

                let response = self.transport.query(&candidates, question).await?;

                if response.authoritative() {
                    debug!(
                        hop = hop,
                        domain = %question.name(),
                        status = ResponseParser::rcode_to_status(response.response_code()),
                        answers = response.answers().len(),
                        "Authoritative answer"
                    );
                    return Ok(MessageBuilder::build_answer(response.answers()));
                }

                let authorities = response.name_servers();
                if authorities.is_empty() {
                    debug!(
                        hop = hop,
                        domain = %question.name(),
                        "Referral without authorities, answering NXDOMAIN"
                    );
                    return Ok(MessageBuilder::build_name_error());
                }

                let nameservers = referral::nameserver_names(authorities);
                let zone = referral::delegated_zone(authorities)
                    .unwrap_or_else(|| question.name().clone());

                let glue = referral::glue_addresses(response.additionals(), &nameservers);

                candidates = if glue.is_empty() {
                    debug!(
                        zone = %zone,
                        nameservers = nameservers.len(),
                        "No glue in referral, resolving nameservers from root"
                    );
                    self.resolve_glueless(&zone, &nameservers, budget).await?
                } else {
                    debug!(zone = %zone, glue = %glue, "Following glue");
                    glue
                };
            }
        }
        .boxed()
    }

    /// Resolves every nameserver name from the root and pools all `A`
    /// answers, in nameserver order.
    async fn resolve_glueless(
        &self,
        zone: &Name,
        nameservers: &[Name],
        budget: &HopBudget,
    ) -> Result<ServerCandidates, DomainError> {
        let mut candidates = ServerCandidates::default();

        for nameserver in nameservers {
            let sub_question = Query::query(nameserver.clone(), RecordType::A);

            match self
                .walk(self.root_hints.candidates(), &sub_question, budget)
                .await
            {
                Ok(answer) => {
                    let before = candidates.len();
                    candidates.extend(referral::answer_addresses(answer.answers()));
                    debug!(
                        nameserver = %nameserver,
                        addresses = candidates.len() - before,
                        "Nameserver resolved"
                    );
                }
                Err(e @ DomainError::ResolutionDepthExceeded(_)) => return Err(e),
                Err(e) => {
                    warn!(nameserver = %nameserver, error = %e, "Lookup of nameserver failed");
                }
            }
        }

        if candidates.is_empty() {
            return Err(DomainError::NoGlueAvailable(zone.to_string()));
        }

        Ok(candidates)
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(
        &self,
        candidates: ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError> {
        let budget = HopBudget::new(self.max_hops);
        let result = self.walk(candidates, question, &budget).await;

        debug!(
            domain = %question.name(),
            hops = budget.used.load(Ordering::Relaxed),
            ok = result.is_ok(),
            "Resolution finished"
        );

        result
    }
}
