//! Logger setup for the `log` facade.

use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "badge_icon_gen=debug"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn verbose(verbose: bool) -> Self {
        Self {
            filter: verbose.then(|| "debug".to_string()),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            // Confirmation lines go to stdout; the log only carries problems.
            builder.filter_level(log::LevelFilter::Warn);
        }

        // Ignore a logger installed by someone else (e.g. a test harness).
        let _ = builder.try_init();

        log::debug!("logging initialized");
    });
}
