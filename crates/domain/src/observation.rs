use crate::dns_message::CapturedDns;
use crate::dns_name::DnsName;
use crate::packet::IpVersion;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};

/// One inspected DNS message, as reported to event sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsObservation {
    pub ip_version: IpVersion,
    pub id: u16,
    pub is_query: bool,
    pub client: SocketAddr,
    pub server: SocketAddr,
    pub question_names: Vec<DnsName>,
    pub resolved_addresses: Vec<IpAddr>,
    /// Subset of `resolved_addresses` that falls into reserved space.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reserved_addresses: Vec<IpAddr>,
    /// New destination of a query that was redirected in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_to: Option<IpAddr>,
}

impl DnsObservation {
    pub fn from_captured(captured: CapturedDns) -> Self {
        let client = captured.client_addr();
        let server = captured.server_addr();
        let CapturedDns { datagram, message } = captured;

        Self {
            ip_version: datagram.addressing.ip_version,
            id: message.id,
            is_query: message.is_query,
            client,
            server,
            question_names: message.question_names,
            resolved_addresses: message.resolved_addresses,
            reserved_addresses: Vec::new(),
            redirected_to: None,
        }
    }

    pub fn has_reserved_answers(&self) -> bool {
        !self.reserved_addresses.is_empty()
    }
}
