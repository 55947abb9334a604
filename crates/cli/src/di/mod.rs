use ferrous_dnswire_application::ports::DnsEventSink;
use ferrous_dnswire_application::use_cases::InspectPacketUseCase;
use ferrous_dnswire_domain::{Config, OutputFormat};
use ferrous_dnswire_infrastructure::{
    DefaultReservedLookup, JsonLinesSink, TracingEventSink, WirePacketDecoder,
};
use std::sync::Arc;

pub struct Services {
    pub inspect: Arc<InspectPacketUseCase>,
    pub sink: Arc<dyn DnsEventSink>,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let sink: Arc<dyn DnsEventSink> = match config.output.format {
            OutputFormat::Text => Arc::new(TracingEventSink::new()),
            OutputFormat::Json => Arc::new(JsonLinesSink::stdout()),
        };

        let inspect = InspectPacketUseCase::new(
            Arc::new(WirePacketDecoder::new()),
            Arc::new(DefaultReservedLookup::new()),
            sink.clone(),
        )
        .with_inspector(config.inspector.clone())
        .with_redirect(config.redirect.clone());

        Self {
            inspect: Arc::new(inspect),
            sink,
        }
    }
}
