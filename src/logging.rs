//! Tracing subscriber setup for the `postchat` binary.
//!
//! Log output goes to stderr so that command output on stdout (chat
//! answers, prompt dumps) stays pipeable. The filter is read from
//! `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "postchat=info,postchat_core=info";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}
