use async_trait::async_trait;
use ferrous_dnswire_application::ports::DnsEventSink;
use ferrous_dnswire_domain::{DnsObservation, DomainError};
use tracing::info;

/// Reports each observation as one structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DnsEventSink for TracingEventSink {
    async fn record(&self, observation: &DnsObservation) -> Result<(), DomainError> {
        let names: Vec<String> = observation
            .question_names
            .iter()
            .map(|name| name.to_string())
            .collect();

        if observation.is_query {
            info!(
                id = observation.id,
                ip_version = %observation.ip_version,
                client = %observation.client,
                server = %observation.server,
                names = ?names,
                redirected_to = ?observation.redirected_to,
                "DNS query"
            );
        } else {
            info!(
                id = observation.id,
                ip_version = %observation.ip_version,
                client = %observation.client,
                server = %observation.server,
                names = ?names,
                addresses = ?observation.resolved_addresses,
                reserved = ?observation.reserved_addresses,
                "DNS response"
            );
        }
        Ok(())
    }
}
