//! Diagnostic output for the command line tool.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug output for this
/// crate when `verbose` is set. Stdout stays reserved for resolved URLs and JSON.
pub fn init_logging(verbose: bool) -> Result<()> {
  let default_directive = if verbose {
    "warn,media_resolver=debug"
  } else {
    "warn"
  };
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

  tracing::debug!("logging initialized");
  Ok(())
}
