#![allow(dead_code)]
mod mock_resolver;

pub use mock_resolver::{answer_message, client_query, nxdomain_message, MockDnsResolver};
