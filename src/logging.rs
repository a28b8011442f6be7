//! File logging.
//!
//! The TUI owns the terminal, so log records can only go to a file. Logging
//! stays off unless a log file is requested.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

/// Default log file for `--debug` without an explicit path.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("seqdiff-{:08x}.log", rand::random::<u32>()))
}

/// Initializes `env_logger` writing to `path`.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when
/// `debug` is set and `info` when not.
pub fn init(path: &Path, debug: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let default_level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path() {
        let path = default_log_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("seqdiff-"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
    }
}
