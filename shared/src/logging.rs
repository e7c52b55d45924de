// File-based tracing setup. The release build has no console, so the log
// file is the only place capture and persistence failures show up.

use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "hexhunter.log";

/// Log to `<config dir>/HexHunter/hexhunter.log` at `level`.
/// If setup fails, prints a warning to stderr and continues without logging.
pub fn init(level: &str) {
    if let Err(e) = init_file(&crate::config::app_dir(), level) {
        eprintln!("Warning: failed to set up file logging: {e}");
    }
}

fn init_file(
    dir: &Path,
    level: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    std::fs::create_dir_all(dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter(level))
        .with_ansi(false)
        .try_init()?;

    Ok(())
}

/// Level from config, falling back to info for anything unparseable.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
