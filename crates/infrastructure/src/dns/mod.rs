pub mod message;
pub mod resolver;
pub mod transport;

pub use message::{MessageBuilder, ResponseParser};
pub use resolver::{IterativeResolver, ResolverBuilder};
pub use transport::{DnsTransport, UdpTransport};
