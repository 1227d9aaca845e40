//! Subscriber setup.
//!
//! Console output uses the human-readable fmt layer; containers get JSON
//! lines with target, thread id, file and line so a log shipper can parse
//! them.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber.
///
/// Fails if the filter directive is invalid or a subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()));
    }

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    crate::log_event!(
        DEBUG,
        config.service_name.as_str(),
        "Structured logging configured",
        json_logs = config.json_logs
    );
    Ok(())
}

/// Build the level filter; `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Structured event tagged with the bean it concerns.
///
/// `level` is a `tracing::Level` constant name; extra fields follow the
/// message.
///
/// ```rust,ignore
/// log_event!(INFO, "paymentService", "Bean ready", intercepted = true);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $bean:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::event!(
            $crate::tracing::Level::$level,
            bean = $bean,
            $($($field)*,)?
            $msg
        )
    };
}
