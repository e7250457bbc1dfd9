use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise only this crate's events at
/// `default_level` and above are shown. Output goes to stderr so that JSON
/// written to stdout stays machine readable.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("spendlog={}", default_level)))
            .unwrap_or_else(|_| EnvFilter::new("spendlog=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
