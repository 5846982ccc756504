use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize `tracing` with a filter read from the environment variable `env`, falling back to
/// `info`.
///
/// Logs go to stderr, stdout is reserved for command output.
pub fn initialize_logging(env: &str) {
    let filter = EnvFilter::try_from_env(env).unwrap_or_else(|_| EnvFilter::new("info"));
    // keeps a subscriber that was installed earlier
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn print_startup_string(
    pkg_description: &str,
    pkg_version: &str,
    git_version: Option<&str>,
    target: &str,
    built_time: &str,
    rustc_version: &str,
) {
    let git_information = match git_version {
        None => "".to_string(),
        Some(git) => format!(" (Git information: {})", git),
    };
    info!("Starting {}", pkg_description);
    info!(
        "This is version {}{}, built for {} by {} at {}",
        pkg_version, git_information, target, rustc_version, built_time
    )
}
