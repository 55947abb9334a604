use crate::ports::{DnsEventSink, PacketDecoder};
use crate::stats::{bump, InspectionStats};
use ferrous_dnswire_domain::config::{InspectorConfig, RedirectConfig};
use ferrous_dnswire_domain::reserved::canonical;
use ferrous_dnswire_domain::protocol::DNS_PORT;
use ferrous_dnswire_domain::{CapturedDns, DnsObservation, DomainError, ReservedAddressLookup};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of inspecting one DNS packet.
#[derive(Debug, Clone)]
pub struct InspectOutcome {
    pub observation: DnsObservation,
    /// The caller's buffer was rewritten in place.
    pub rewritten: bool,
}

/// Decodes captured packets, flags answers pointing into reserved address
/// space, redirects queries when configured and reports every decoded
/// message to the event sink.
pub struct InspectPacketUseCase {
    decoder: Arc<dyn PacketDecoder>,
    reserved: Arc<dyn ReservedAddressLookup>,
    sink: Arc<dyn DnsEventSink>,
    inspector: InspectorConfig,
    redirect: RedirectConfig,
    stats: Arc<InspectionStats>,
}

impl InspectPacketUseCase {
    pub fn new(
        decoder: Arc<dyn PacketDecoder>,
        reserved: Arc<dyn ReservedAddressLookup>,
        sink: Arc<dyn DnsEventSink>,
    ) -> Self {
        Self {
            decoder,
            reserved,
            sink,
            inspector: InspectorConfig::default(),
            redirect: RedirectConfig::default(),
            stats: Arc::new(InspectionStats::new()),
        }
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn with_redirect(mut self, redirect: RedirectConfig) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_stats(mut self, stats: Arc<InspectionStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> Arc<InspectionStats> {
        Arc::clone(&self.stats)
    }

    /// Inspects one packet. Rejected packets return `DomainError::Packet`;
    /// rewrite and sink failures are logged and counted but do not fail the
    /// call, since the message itself was decoded.
    pub async fn execute(&self, packet: &mut [u8]) -> Result<InspectOutcome, DomainError> {
        bump(&self.stats.inspected);

        let captured = match self.decoder.decode(packet) {
            Ok(captured) => captured,
            Err(e) => {
                self.stats.record_rejection(&e);
                if self.inspector.summarize_rejected {
                    debug!(
                        reason = e.kind(),
                        summary = %self.decoder.summarize(packet),
                        "Packet rejected"
                    );
                }
                return Err(DomainError::Packet(e));
            }
        };

        bump(&self.stats.decoded);
        if captured.message.is_query {
            bump(&self.stats.queries);
        } else {
            bump(&self.stats.responses);
        }

        let redirect = self.redirect_target(&captured);
        let mut observation = DnsObservation::from_captured(captured);

        if self.inspector.flag_reserved_answers {
            self.flag_reserved(&mut observation);
        }

        let mut rewritten = false;
        if let Some(target) = redirect {
            match self.redirect(packet, target) {
                Ok(()) => {
                    bump(&self.stats.redirected);
                    info!(
                        from = %observation.server.ip(),
                        to = %target,
                        id = observation.id,
                        "Query redirected"
                    );
                    observation.redirected_to = Some(target);
                    rewritten = true;
                }
                Err(e) => {
                    bump(&self.stats.rewrite_failures);
                    warn!(error = %e, target = %target, "Failed to redirect query");
                }
            }
        }

        if let Err(e) = self.sink.record(&observation).await {
            bump(&self.stats.sink_failures);
            warn!(error = %e, id = observation.id, "Failed to record DNS observation");
        }

        Ok(InspectOutcome {
            observation,
            rewritten,
        })
    }

    /// The configured target for a query not already addressed to it.
    fn redirect_target(&self, captured: &CapturedDns) -> Option<IpAddr> {
        if !captured.message.is_query {
            return None;
        }

        let target: IpAddr = self
            .redirect
            .target_for(captured.datagram.addressing.ip_version)?
            .parse()
            .ok()?;

        let server = captured.server_addr();
        if canonical(server.ip()) == canonical(target) && server.port() == DNS_PORT {
            return None;
        }
        Some(target)
    }

    fn redirect(&self, packet: &mut [u8], target: IpAddr) -> Result<(), DomainError> {
        self.decoder
            .rewrite_destination(packet, &target.to_string())
            .map_err(DomainError::Rewrite)
    }

    fn flag_reserved(&self, observation: &mut DnsObservation) {
        observation.reserved_addresses = observation
            .resolved_addresses
            .iter()
            .copied()
            .filter(|addr| self.reserved.is_reserved(*addr))
            .collect();

        if observation.has_reserved_answers() {
            bump(&self.stats.reserved_answers);
            let names: Vec<String> = observation
                .question_names
                .iter()
                .map(|name| name.to_string())
                .collect();
            warn!(
                names = ?names,
                addresses = ?observation.reserved_addresses,
                server = %observation.server,
                "Answer resolves into reserved address space"
            );
        }
    }
}
