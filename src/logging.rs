//! Diagnostic logging
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs, including every formatting command
//! - `RUST_LOG=richpad::session=debug` - module-level filtering
//!
//! Without RUST_LOG the level from the config file is used.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. Only the binary calls this.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}
