use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `filter` uses `EnvFilter` directive syntax;
/// an unparsable filter falls back to the crate default.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(env_filter)
        .init();
}
