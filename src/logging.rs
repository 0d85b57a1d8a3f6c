use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber};

use crate::formatter::FrameFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        // RUST_LOG wins; otherwise our crate logs at info and dependencies at warn
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let subscriber = FmtSubscriber::builder()
            .with_writer(std::io::stderr)
            .with_ansi(cfg!(not(target_os = "emscripten")))
            .event_format(FrameFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not install tracing subscriber: {e}");
        }
    });
}
