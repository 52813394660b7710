use rootwalk_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logs the effective configuration; call once the subscriber is installed.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        root_servers = config.resolver.root_hints.len(),
        upstream_port = config.resolver.upstream_port,
        timeout_ms = ?config.resolver.query_timeout_ms,
        max_hops = ?config.resolver.max_hops,
        strict_validation = config.resolver.strict_validation,
        "Configuration loaded"
    );
}
