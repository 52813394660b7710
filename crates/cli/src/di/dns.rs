use rootwalk_application::use_cases::HandleDnsQueryUseCase;
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::ResolverBuilder;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let root_hints = config.resolver.parsed_root_hints()?;

        let resolver = ResolverBuilder::new(root_hints.clone())
            .with_config(config.resolver.clone())
            .build();

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(resolver, root_hints));

        info!("DNS services initialized");

        Ok(Self { handler_use_case })
    }
}
