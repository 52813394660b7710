//! Helpers for reading a referral: NS targets from the authority section and
//! matching glue from the additional section.

use hickory_proto::rr::{Name, RData, Record};
use rootwalk_domain::ServerCandidates;
use std::net::IpAddr;

/// NS targets in authority-section order.
pub fn nameserver_names(authorities: &[Record]) -> Vec<Name> {
    authorities
        .iter()
        .filter_map(|record| match record.data() {
            RData::NS(ns) => Some(ns.0.clone()),
            _ => None,
        })
        .collect()
}

/// Owner of the first NS record, i.e. the zone being delegated.
pub fn delegated_zone(authorities: &[Record]) -> Option<Name> {
    authorities
        .iter()
        .find(|record| matches!(record.data(), RData::NS(_)))
        .map(|record| record.name().clone())
}

/// `A` records in `additionals` owned by one of `nameservers`, in
/// additional-section order. Glue is taken as-is.
pub fn glue_addresses(additionals: &[Record], nameservers: &[Name]) -> ServerCandidates {
    additionals
        .iter()
        .filter(|record| nameservers.iter().any(|ns| ns == record.name()))
        .filter_map(|record| match record.data() {
            RData::A(a) => Some(IpAddr::V4(a.0)),
            _ => None,
        })
        .collect()
}

/// Every `A` answer in `answers`.
pub fn answer_addresses(answers: &[Record]) -> impl Iterator<Item = IpAddr> + '_ {
    answers.iter().filter_map(|record| match record.data() {
        RData::A(a) => Some(IpAddr::V4(a.0)),
        _ => None,
    })
}
