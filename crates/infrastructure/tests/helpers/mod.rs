#![allow(dead_code)]
#![allow(unused_imports)]
mod builders;
mod dns_server_mock;
mod scripted_transport;

pub use builders::{
    a_record, authoritative_answer, empty_referral, ip, name, ns_record, question, referral,
    with_id, MessageFixture,
};
pub use dns_server_mock::MockDnsServer;
pub use scripted_transport::ScriptedTransport;
