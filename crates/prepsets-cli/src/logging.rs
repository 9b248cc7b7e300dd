use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr subscriber.
///
/// `PREPSETS_LOG` takes precedence over `RUST_LOG`; without either only
/// warnings are shown so the terminal output stays readable.
pub fn init() {
    let filter = EnvFilter::try_from_env("PREPSETS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
