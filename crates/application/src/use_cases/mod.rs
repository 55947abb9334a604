pub mod inspect_packet;

// Re-export use cases
pub use inspect_packet::{InspectOutcome, InspectPacketUseCase};
