//! # Bean Telemetry
//!
//! Logging bootstrap for processes hosting a bean registry. The registry
//! itself only emits `tracing` events; this crate installs the subscriber.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bean_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // Registry warm-up and application code here
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BEAN_SERVICE_NAME` | `bean-registry` | Service name in logs |
//! | `BEAN_LOG_LEVEL` | `info` | Log level filter |
//! | `BEAN_CONSOLE_OUTPUT` | `true` | Print to the console |
//! | `BEAN_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
