use std::sync::Once;

/// How the native logger is set up.
///
/// `env_filter` overrides `RUST_LOG` when present; both use `env_logger`
/// directive syntax such as `trigon_engine=debug,wgpu_core=warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Whether log lines are colored.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend.
///
/// Only the first call does anything. Without an explicit filter or `RUST_LOG`
/// the level is `info`, with wgpu and naga internals held at `warn` so adapter
/// and submission lines stay readable.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        // A test harness or embedding binary may have installed a logger first.
        if builder.try_init().is_ok() {
            log::debug!("env_logger installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_the_first_logger() {
        init_logging(LoggingConfig {
            env_filter: Some("warn".to_string()),
            ..LoggingConfig::default()
        });
        init_logging(LoggingConfig::default());
        log::warn!("logger still usable after a second init");
    }
}
