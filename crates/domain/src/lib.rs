//! rootwalk Domain Layer
pub mod config;
pub mod errors;
pub mod root_hints;
pub mod server_candidates;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig, ServerConfig};
pub use errors::DomainError;
pub use root_hints::{RootHints, ROOT_SERVERS};
pub use server_candidates::ServerCandidates;
