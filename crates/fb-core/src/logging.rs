//! Logging initialization using the `tracing` ecosystem.
//!
//! Console output goes to **stderr** so that stdout carries only the JSON
//! documents emitted by commands. An optional directory adds a daily
//! rolling file via `tracing-appender`. `RUST_LOG` wins over `log_level`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
///
/// # Parameters
///
/// - `log_level`: default level if `RUST_LOG` is not set (e.g. `"warn"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `module_name`: used as the log file prefix (e.g. `"fubon"`)
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);

    let result = if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, module_name);
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!("logging already initialized: {e}");
    }
}

/// Mask an identity string for logs and status output (`A12***`).
pub fn mask_identity(id: &str) -> String {
    let head: String = id.chars().take(3).collect();
    format!("{head}***")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_three_chars() {
        assert_eq!(mask_identity("A123456789"), "A12***");
        assert_eq!(mask_identity("AB"), "AB***");
    }
}
