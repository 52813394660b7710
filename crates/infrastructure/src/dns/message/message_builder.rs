//! DNS Message Builder
//!
//! Constructs the outbound iterative queries and the messages the resolver
//! hands back to the dispatcher, using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::Record;
use rootwalk_domain::DomainError;

/// Builds DNS messages for the iterative resolver
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build an iterative query for `question` and serialize it.
    ///
    /// The query carries:
    /// - a random ID drawn from the full 16-bit space
    /// - `OpCode::Query`, RD unset
    /// - `question` as its single question
    ///
    /// The returned `Message` is kept by the caller to validate the response.
    pub fn build_iterative_query(question: &Query) -> Result<(Message, Vec<u8>), DomainError> {
        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(question.clone());

        let bytes = Self::serialize_message(&message)?;
        Ok((message, bytes))
    }

    /// Successful resolution: an authoritative response carrying `answers`
    /// verbatim.
    pub fn build_answer(answers: &[Record]) -> Message {
        let mut message = Message::new(0, MessageType::Response, OpCode::Query);
        message.set_authoritative(true);
        message.add_answers(answers.iter().cloned());
        message
    }

    /// Name error: NXDOMAIN, no answers.
    pub fn build_name_error() -> Message {
        let mut message = Message::new(0, MessageType::Response, OpCode::Query);
        message.set_response_code(ResponseCode::NXDomain);
        message
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        message
            .to_vec()
            .map_err(|e| DomainError::EncodeFailed(format!("Failed to serialize DNS message: {}", e)))
    }
}
