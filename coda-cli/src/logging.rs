use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins, then `--verbose`, then the config level.
pub fn init(config_level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { config_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
