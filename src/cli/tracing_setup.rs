use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "ADTRAIL_LOG";

/// Initialize diagnostics on stderr.
///
/// `ADTRAIL_LOG` wins when set; otherwise `--verbose` enables debug
/// output for this crate and everything else stays at `warn`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,adtrail=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
