use tracing_subscriber::EnvFilter;

/// Initialize tracing for the command-line tool.
///
/// Output goes to stderr so stdout stays machine-readable. `RUST_LOG`
/// overrides the default level, which is `warn` (or `debug` with
/// `verbose`). Store transitions are logged at `trace` under the
/// `blog_store::store` target.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
