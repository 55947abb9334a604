mod errors;
mod inspector;
mod logging;
mod output;
mod redirect;
mod root;

pub use errors::ConfigError;
pub use inspector::InspectorConfig;
pub use logging::{LogFormat, LoggingConfig, LOG_LEVELS};
pub use output::{OutputConfig, OutputFormat};
pub use redirect::RedirectConfig;
pub use root::{CliOverrides, Config};
