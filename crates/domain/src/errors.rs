use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Malformed DNS response: {0}")]
    MalformedResponse(String),

    #[error("Malformed client query: {0}")]
    MalformedQuery(String),

    #[error("Client query carries no question")]
    MissingQuestion,

    #[error("Failed to make connection to any candidate server")]
    NoReachableServer,

    #[error("Failed to send query to {server}: {reason}")]
    TransportSendFailed { server: String, reason: String },

    #[error("Failed to receive response from {server}: {reason}")]
    TransportRecvFailed { server: String, reason: String },

    #[error("Query timeout waiting for {server}")]
    QueryTimeout { server: String },

    #[error("Response ID mismatch: sent {expected:#06x}, received {received:#06x}")]
    ResponseIdMismatch { expected: u16, received: u16 },

    #[error("Response from unexpected source: expected {expected}, received from {received}")]
    UnexpectedResponseSource { expected: String, received: String },

    #[error("No address found for any nameserver delegated by {0}")]
    NoGlueAvailable(String),

    #[error("Resolution depth exceeded after {0} hops")]
    ResolutionDepthExceeded(usize),

    #[error("Failed to encode DNS message: {0}")]
    EncodeFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
