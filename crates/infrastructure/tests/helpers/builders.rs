use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn question(domain: &str) -> Query {
    Query::query(name(domain), RecordType::A)
}

pub fn a_record(owner: &str, addr: &str) -> Record {
    let v4: Ipv4Addr = addr.parse().unwrap();
    Record::from_rdata(name(owner), 300, RData::A(A(v4)))
}

pub fn ns_record(zone: &str, target: &str) -> Record {
    Record::from_rdata(name(zone), 172800, RData::NS(NS(name(target))))
}

/// Fluent builder for upstream responses handed to the resolver.
pub struct MessageFixture {
    message: Message,
}

impl MessageFixture {
    pub fn new() -> Self {
        Self {
            message: Message::new(0, MessageType::Response, OpCode::Query),
        }
    }

    pub fn authoritative(mut self) -> Self {
        self.message.set_authoritative(true);
        self
    }

    pub fn question(mut self, domain: &str) -> Self {
        self.message.add_query(question(domain));
        self
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.message.add_answer(record);
        self
    }

    pub fn authority(mut self, record: Record) -> Self {
        self.message.add_name_server(record);
        self
    }

    pub fn additional(mut self, record: Record) -> Self {
        self.message.add_additional(record);
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

impl Default for MessageFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces the transaction ID of `message`.
pub fn with_id(mut message: Message, id: u16) -> Message {
    let mut header = *message.header();
    header.set_id(id);
    message.set_header(header);
    message
}

/// Authoritative response with one `A` answer per address.
pub fn authoritative_answer(domain: &str, addrs: &[&str]) -> Message {
    addrs
        .iter()
        .fold(MessageFixture::new().authoritative().question(domain), |f, addr| {
            f.answer(a_record(domain, addr))
        })
        .build()
}

/// Non-authoritative referral for `zone`; `glue` pairs each nameserver with an
/// optional address placed in the additional section.
pub fn referral(zone: &str, nameservers: &[(&str, Option<&str>)]) -> Message {
    let mut fixture = MessageFixture::new();
    for (target, _) in nameservers {
        fixture = fixture.authority(ns_record(zone, target));
    }
    for (target, glue) in nameservers {
        if let Some(addr) = glue {
            fixture = fixture.additional(a_record(target, addr));
        }
    }
    fixture.build()
}

/// Non-authoritative response with an empty authority section.
pub fn empty_referral() -> Message {
    MessageFixture::new().build()
}
