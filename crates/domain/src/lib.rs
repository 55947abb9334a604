//! Ferrous DNSWire Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_name;
pub mod errors;
pub mod observation;
pub mod packet;
pub mod protocol;
pub mod reserved;

pub use config::{CliOverrides, Config, ConfigError, LogFormat, OutputFormat};
pub use dns_message::{CapturedDns, DnsMessageView};
pub use dns_name::DnsName;
pub use errors::{DomainError, PacketError};
pub use observation::DnsObservation;
pub use packet::{Addressing, IpVersion, UdpDatagram};
pub use reserved::{is_private_ip, ReservedAddressLookup};
