use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use rootwalk_application::ports::DnsResolver;
use rootwalk_domain::{DomainError, ServerCandidates};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockDnsResolver {
    result: Arc<Mutex<Result<Message, DomainError>>>,
    calls: Arc<Mutex<Vec<(ServerCandidates, Query)>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            result: Arc::new(Mutex::new(Err(DomainError::NoReachableServer))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn returning(result: Result<Message, DomainError>) -> Self {
        let mock = Self::new();
        *mock.result.lock().unwrap() = result;
        mock
    }

    pub fn calls(&self) -> Vec<(ServerCandidates, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        candidates: ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((candidates, question.clone()));
        self.result.lock().unwrap().clone()
    }
}

pub fn client_query(id: u16, names: &[&str], record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for name in names {
        message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    }
    message.to_vec().unwrap()
}

pub fn answer_message(name: &str, ips: &[Ipv4Addr]) -> Message {
    let mut message = Message::new(0, MessageType::Response, OpCode::Query);
    for ip in ips {
        message.add_answer(Record::from_rdata(
            Name::from_str(name).unwrap(),
            300,
            RData::A(A(*ip)),
        ));
    }
    message
}

pub fn nxdomain_message() -> Message {
    let mut message = Message::new(0, MessageType::Response, OpCode::Query);
    message.set_response_code(ResponseCode::NXDomain);
    message
}
