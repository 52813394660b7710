use super::iterative::IterativeResolver;
use crate::dns::transport::{DnsTransport, UdpTransport};
use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::{ResolverConfig, RootHints};
use std::sync::Arc;
use tracing::info;

pub struct ResolverBuilder {
    root_hints: RootHints,
    config: ResolverConfig,
    transport: Option<Arc<dyn DnsTransport>>,
}

impl ResolverBuilder {
    pub fn new(root_hints: RootHints) -> Self {
        Self {
            root_hints,
            config: ResolverConfig::default(),
            transport: None,
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the UDP transport derived from the config.
    pub fn with_transport(mut self, transport: Arc<dyn DnsTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Arc<dyn DnsResolver> {
        info!(
            root_servers = self.root_hints.len(),
            upstream_port = self.config.upstream_port,
            timeout_ms = ?self.config.query_timeout_ms,
            max_hops = ?self.config.max_hops,
            strict_validation = self.config.strict_validation,
            "Building DNS resolver"
        );

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(UdpTransport::from_config(&self.config)));

        let mut resolver = IterativeResolver::new(transport, self.root_hints);
        if let Some(max_hops) = self.config.max_hops {
            resolver = resolver.with_max_hops(max_hops);
        }

        info!("DNS resolver built successfully");
        Arc::new(resolver)
    }
}
