use {
    std::sync::Once,
    tracing_subscriber::{EnvFilter, FmtSubscriber},
};

// `set_global_default` rejects a second subscriber, hence the `Once` gate.
static TRACING: Once = Once::new();

pub fn setup_tracing_subscriber(level: tracing::Level) {
    TRACING.call_once(|| {
        let filter = EnvFilter::new(level.to_string()); // Apply level to all crates

        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("failed to set global tracing subscriber");
    });
}
