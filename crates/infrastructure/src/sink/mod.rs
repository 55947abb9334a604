mod json_lines;
mod tracing_sink;

pub use json_lines::JsonLinesSink;
pub use tracing_sink::TracingEventSink;
