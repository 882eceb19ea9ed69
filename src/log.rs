// src/log.rs
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Env var that overrides the verbosity-derived filter.
pub const LOG_ENV: &str = "GC_SCRAPE_LOG";

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "gc_scrape=warn",
        1 => "gc_scrape=info",
        2 => "gc_scrape=debug",
        _ => "gc_scrape=trace",
    }
}

/// Install the stderr subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(default_filter(0), "gc_scrape=warn");
        assert_eq!(default_filter(2), "gc_scrape=debug");
        assert_eq!(default_filter(9), "gc_scrape=trace");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(1);
        init(3);
        logd!("still alive");
    }
}
