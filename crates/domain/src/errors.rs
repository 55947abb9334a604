use thiserror::Error;

/// Reasons a captured packet is rejected by the wire codec.
///
/// Every variant aborts the whole decode: callers never observe a partially
/// populated result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet too short")]
    TooShort,

    #[error("unsupported IP version {0}")]
    InvalidVersion(u8),

    #[error("invalid IPv4 header length: {0} bytes")]
    InvalidHeaderLength(usize),

    #[error("fragmented datagram")]
    Fragmented,

    #[error("not a UDP packet: protocol {0}")]
    WrongProtocol(u8),

    #[error("not DNS traffic: ports {src_port} -> {dst_port}")]
    WrongPort { src_port: u16, dst_port: u16 },

    #[error("unsupported IPv6 extension header {0}")]
    UnsupportedExtensionChain(u8),

    #[error("truncated header")]
    TruncatedHeader,

    #[error("compression pointer depth exceeded")]
    PointerDepthExceeded,

    #[error("invalid label type 0x{0:02x}")]
    InvalidLabelType(u8),

    #[error("truncated name")]
    TruncatedName,

    #[error("truncated record")]
    TruncatedRecord,

    #[error("invalid rewrite target: {0}")]
    InvalidTarget(String),

    #[error("rewrite target address family does not match the packet")]
    AddressFamilyMismatch,

    #[error("payload of {0} bytes does not fit in a single datagram")]
    PayloadTooLarge(usize),
}

impl PacketError {
    /// Stable snake_case label, used for statistics and structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PacketError::TooShort => "too_short",
            PacketError::InvalidVersion(_) => "invalid_version",
            PacketError::InvalidHeaderLength(_) => "invalid_header_length",
            PacketError::Fragmented => "fragmented",
            PacketError::WrongProtocol(_) => "wrong_protocol",
            PacketError::WrongPort { .. } => "wrong_port",
            PacketError::UnsupportedExtensionChain(_) => "unsupported_extension_chain",
            PacketError::TruncatedHeader => "truncated_header",
            PacketError::PointerDepthExceeded => "pointer_depth_exceeded",
            PacketError::InvalidLabelType(_) => "invalid_label_type",
            PacketError::TruncatedName => "truncated_name",
            PacketError::TruncatedRecord => "truncated_record",
            PacketError::InvalidTarget(_) => "invalid_target",
            PacketError::AddressFamilyMismatch => "address_family_mismatch",
            PacketError::PayloadTooLarge(_) => "payload_too_large",
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Packet rejected: {0}")]
    Packet(#[from] PacketError),

    #[error("Destination rewrite failed: {0}")]
    Rewrite(PacketError),

    #[error("Event sink error: {0}")]
    SinkError(String),
}
