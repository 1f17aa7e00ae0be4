use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never interleave with prompts on stdout.
/// Quiet by default; `RUST_LOG=uniapi_core=debug` shows why a fetch came back empty.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
