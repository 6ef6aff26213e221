//! Process plumbing shared by server binaries: layered configuration,
//! logging setup and signal-driven shutdown.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig};
pub use logging::init_logging_from_config;
pub use shutdown::{cancel_on_shutdown, wait_for_shutdown};
