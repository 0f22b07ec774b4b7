use tracing_subscriber::{
    filter::{Directive, LevelFilter},
    EnvFilter,
};

fn directive(s: &str) -> Directive {
    s.parse().unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// Logs go to stderr so binaries can write their output to stdout.
pub fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive(directive("dashboard_service=info"))
        .add_directive(directive("factory_kpi=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
