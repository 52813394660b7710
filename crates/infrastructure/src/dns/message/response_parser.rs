use hickory_proto::op::{Message, ResponseCode};
use rootwalk_domain::DomainError;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode an upstream datagram and check it answers `request`.
    ///
    /// The only content check is the question count; anything else a server
    /// puts in the sections is handed to the resolver as-is.
    pub fn parse(response_bytes: &[u8], request: &Message) -> Result<Message, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.queries().len() != request.queries().len() {
            return Err(DomainError::MalformedResponse(format!(
                "answer packet has {} questions, query had {}",
                message.queries().len(),
                request.queries().len()
            )));
        }

        debug!(
            id = message.id(),
            rcode = ?message.response_code(),
            authoritative = message.authoritative(),
            truncated = message.truncated(),
            answers = message.answers().len(),
            authority = message.name_servers().len(),
            additional = message.additionals().len(),
            "DNS response parsed"
        );

        Ok(message)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
