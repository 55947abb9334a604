mod config;
mod logging;

pub use config::{load_config, write_default_config};
pub use logging::init_logging;
