//! Tracing initialization.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Builds the event filter: `RUST_LOG` first, then `config.trace_level`.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    })
}

/// Installs the global subscriber writing to stderr.
///
/// Idempotent: only the first call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };
        init_tracing(&config);
        init_tracing(&config);
        tracing::debug!("still fine");
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = Config {
            trace_level: Some("not=a=level[".to_string()),
            ..Config::default()
        };
        let _ = env_filter(&config);
    }
}
