use async_trait::async_trait;
use ferrous_dnswire_application::ports::DnsEventSink;
use ferrous_dnswire_domain::{DnsObservation, DomainError};
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Writes one JSON document per observation, newline separated.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl JsonLinesSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> DnsEventSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn record(&self, observation: &DnsObservation) -> Result<(), DomainError> {
        let mut line = serde_json::to_vec(observation)
            .map_err(|e| DomainError::SinkError(format!("Failed to serialize: {}", e)))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(|e| DomainError::SinkError(e.to_string()))
    }

    async fn flush(&self) -> Result<(), DomainError> {
        self.writer
            .lock()
            .await
            .flush()
            .await
            .map_err(|e| DomainError::SinkError(e.to_string()))
    }
}
