//! Logging and tracing utilities

use crate::{Config, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
pub fn init_tracing() -> bool {
    init_tracing_with(&Config::default())
}

/// Initialize tracing from an application config
///
/// `RUST_LOG` wins over `config.log_filter` when set. Returns `false` when a
/// global subscriber was already installed, in which case that one is kept.
pub fn init_tracing_with(config: &Config) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let resolved = filter.to_string();

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    match installed {
        Ok(()) => {
            tracing::debug!(
                app = %config.app_name,
                filter = %resolved,
                format = ?config.log_format,
                "Tracing initialized"
            );
            true
        }
        Err(e) => {
            // reported through whichever subscriber won
            tracing::warn!(error = %e, "Tracing already initialized, keeping existing subscriber");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_existing_subscriber() {
        let config = Config {
            log_format: LogFormat::Json,
            ..Config::default()
        };
        init_tracing_with(&config);

        assert!(!init_tracing_with(&config));
        assert!(!init_tracing());
    }
}
