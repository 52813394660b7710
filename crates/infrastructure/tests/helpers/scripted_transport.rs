use async_trait::async_trait;
use hickory_proto::op::{Message, Query};
use rootwalk_domain::{DomainError, ServerCandidates};
use rootwalk_infrastructure::dns::transport::DnsTransport;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transport double that replays responses in order and records every query.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Message, DomainError>>>,
    calls: Mutex<Vec<(ServerCandidates, Query)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<Message, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(ServerCandidates, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn query(
        &self,
        candidates: &ServerCandidates,
        question: &Query,
    ) -> Result<Message, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((candidates.clone(), question.clone()));

        if candidates.is_empty() {
            return Err(DomainError::NoReachableServer);
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DomainError::TransportRecvFailed {
                server: candidates.to_string(),
                reason: "script exhausted".to_string(),
            }))
    }

    fn protocol_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
