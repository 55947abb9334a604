use crate::dns_name::DnsName;
use crate::packet::UdpDatagram;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};

/// The DNS semantics extracted from one message.
///
/// Everything is an owned copy: overwriting the source buffer afterwards does
/// not affect any value held here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DnsMessageView {
    pub id: u16,
    pub is_query: bool,
    pub question_names: Vec<DnsName>,
    /// A/AAAA answers in wire order. Always empty for queries.
    pub resolved_addresses: Vec<IpAddr>,
}

impl DnsMessageView {
    pub fn is_response(&self) -> bool {
        !self.is_query
    }
}

/// A DNS message located inside a captured network-layer packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedDns {
    pub datagram: UdpDatagram,
    pub message: DnsMessageView,
}

impl CapturedDns {
    /// The DNS server side of the exchange: the destination of a query, the
    /// source of a response.
    pub fn server_addr(&self) -> SocketAddr {
        if self.message.is_query {
            self.datagram.destination
        } else {
            self.datagram.source
        }
    }

    /// The client side of the exchange.
    pub fn client_addr(&self) -> SocketAddr {
        if self.message.is_query {
            self.datagram.source
        } else {
            self.datagram.destination
        }
    }
}
