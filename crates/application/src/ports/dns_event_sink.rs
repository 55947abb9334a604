use async_trait::async_trait;
use ferrous_dnswire_domain::{DnsObservation, DomainError};

#[async_trait]
pub trait DnsEventSink: Send + Sync {
    async fn record(&self, observation: &DnsObservation) -> Result<(), DomainError>;

    /// Flush buffered output. Default implementation does nothing.
    async fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
