use crate::utils::from_env::FromEnvVar;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

const TRACING_LOG_JSON: &str = "TRACING_LOG_JSON";

/// Install a format layer writing to stderr, selected by the
/// `TRACING_LOG_JSON` environment variable, and then install the registry.
macro_rules! install_fmt {
    (json @ $registry:ident, $filter:ident) => {{
        let fmt = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter($filter);
        $registry.with(fmt).init();
    }};
    (log @ $registry:ident, $filter:ident) => {{
        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter($filter);
        $registry.with(fmt).init();
    }};
    ($registry:ident, $filter:ident) => {{
        let json = bool::from_env_var(TRACING_LOG_JSON).unwrap_or(false);
        if json {
            install_fmt!(json @ $registry, $filter);
        } else {
            install_fmt!(log @ $registry, $filter);
        }
    }};
}

/// Build the [`EnvFilter`] used by [`init_tracing`]. Directives come from
/// `RUST_LOG`, defaulting to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Init tracing.
///
/// Logs are always written to stderr, so that stdout carries only the
/// program's output.
///
/// ## Env Reads
///
/// - `RUST_LOG` - [`EnvFilter`] directives. Defaults to `info`.
/// - `TRACING_LOG_JSON` - If set, will enable JSON logging.
///
/// ## Panics
///
/// This function will panic if a global subscriber has already been set.
pub fn init_tracing() {
    let registry = tracing_subscriber::registry();
    let filter = env_filter();

    install_fmt!(registry, filter);
}
