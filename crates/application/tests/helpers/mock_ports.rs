#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_dnswire_application::ports::{DnsEventSink, PacketDecoder, ReservedAddressLookup};
use ferrous_dnswire_domain::{
    Addressing, CapturedDns, DnsMessageView, DnsName, DnsObservation, DomainError, IpVersion,
    PacketError, UdpDatagram,
};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const CLIENT: &str = "192.168.1.100:40000";
pub const SERVER: &str = "8.8.8.8:53";
pub const CLIENT_V6: &str = "[2001:db8::100]:40000";
pub const SERVER_V6: &str = "[2001:4860:4860::8888]:53";

fn datagram(source: &str, destination: &str) -> UdpDatagram {
    let source: SocketAddr = source.parse().unwrap();
    let destination: SocketAddr = destination.parse().unwrap();
    let (ip_version, transport_offset) = if source.is_ipv4() {
        (IpVersion::V4, 20)
    } else {
        (IpVersion::V6, 40)
    };

    UdpDatagram {
        addressing: Addressing {
            ip_version,
            transport_offset,
            transport_protocol: 17,
        },
        source,
        destination,
        udp_length: 40,
        payload: transport_offset + 8..transport_offset + 40,
    }
}

pub fn captured_query(client: &str, server: &str, name: &str) -> CapturedDns {
    CapturedDns {
        datagram: datagram(client, server),
        message: DnsMessageView {
            id: 0x1234,
            is_query: true,
            question_names: vec![DnsName::from(name)],
            resolved_addresses: vec![],
        },
    }
}

pub fn captured_response(name: &str, addresses: &[&str]) -> CapturedDns {
    CapturedDns {
        datagram: datagram(SERVER, CLIENT),
        message: DnsMessageView {
            id: 0x1234,
            is_query: false,
            question_names: vec![DnsName::from(name)],
            resolved_addresses: addresses.iter().map(|a| a.parse().unwrap()).collect(),
        },
    }
}

pub struct MockPacketDecoder {
    decode_result: std::sync::RwLock<Result<CapturedDns, PacketError>>,
    rewrite_result: std::sync::RwLock<Result<(), PacketError>>,
    rewrites: std::sync::RwLock<Vec<String>>,
}

impl MockPacketDecoder {
    pub fn decoding(captured: CapturedDns) -> Self {
        Self {
            decode_result: std::sync::RwLock::new(Ok(captured)),
            rewrite_result: std::sync::RwLock::new(Ok(())),
            rewrites: std::sync::RwLock::new(Vec::new()),
        }
    }

    pub fn rejecting(error: PacketError) -> Self {
        Self {
            decode_result: std::sync::RwLock::new(Err(error)),
            rewrite_result: std::sync::RwLock::new(Ok(())),
            rewrites: std::sync::RwLock::new(Vec::new()),
        }
    }

    pub fn set_rewrite_result(&self, result: Result<(), PacketError>) {
        *self.rewrite_result.write().unwrap() = result;
    }

    pub fn rewrites(&self) -> Vec<String> {
        self.rewrites.read().unwrap().clone()
    }
}

impl PacketDecoder for MockPacketDecoder {
    fn decode(&self, _packet: &[u8]) -> Result<CapturedDns, PacketError> {
        self.decode_result.read().unwrap().clone()
    }

    fn rewrite_destination(&self, packet: &mut [u8], target: &str) -> Result<(), PacketError> {
        self.rewrite_result.read().unwrap().clone()?;
        self.rewrites.write().unwrap().push(target.to_string());
        if let Some(first) = packet.first_mut() {
            *first = 0xEE;
        }
        Ok(())
    }

    fn summarize(&self, _packet: &[u8]) -> String {
        "mock packet".to_string()
    }
}

#[derive(Clone, Default)]
pub struct MockEventSink {
    observations: Arc<RwLock<Vec<DnsObservation>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn observations(&self) -> Vec<DnsObservation> {
        self.observations.read().await.clone()
    }
}

#[async_trait]
impl DnsEventSink for MockEventSink {
    async fn record(&self, observation: &DnsObservation) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::SinkError("Mock sink failure".to_string()));
        }
        self.observations.write().await.push(observation.clone());
        Ok(())
    }
}

/// Flags only the addresses it was given, plus the shared private ranges.
#[derive(Default)]
pub struct MockReservedLookup {
    special: HashSet<IpAddr>,
}

impl MockReservedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_special(addresses: &[&str]) -> Self {
        Self {
            special: addresses.iter().map(|a| a.parse().unwrap()).collect(),
        }
    }
}

impl ReservedAddressLookup for MockReservedLookup {
    fn is_special_purpose(&self, ip: IpAddr) -> bool {
        self.special.contains(&ip)
    }
}
