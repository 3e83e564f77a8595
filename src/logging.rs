//! Log setup
//!
//! The TUI owns the terminal, so logs go to a file under the platform
//! data directory. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "ecotrack=info";

/// Log file location under a data directory
fn log_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("ecotrack").join("ecotrack.log")
}

/// Path of the log file
pub fn log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("Could not determine data directory")?;
    Ok(log_path_in(&data_dir))
}

/// Open `path` for appending, creating its directory first
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

/// Install the global subscriber writing to the log file
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(path)
}

/// Like `init`, but a failure only disables logging
pub fn init_or_warn() -> Option<PathBuf> {
    warn_on_failure(init())
}

fn warn_on_failure(result: Result<PathBuf>) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_namespaced() {
        let path = log_path_in(Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/ecotrack/ecotrack.log"));
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path_in(dir.path());

        open_log_file(&path).unwrap();
        assert!(path.exists());
        // Reopening appends rather than failing
        open_log_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_log_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("ecotrack");
        fs::write(&blocker, "not a directory").unwrap();

        let err = open_log_file(&log_path_in(dir.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create log directory"));
    }

    #[test]
    fn test_failed_init_disables_logging() {
        let failed: Result<PathBuf> = Err(anyhow::anyhow!("read-only data dir"));
        assert_eq!(warn_on_failure(failed), None);

        let path = PathBuf::from("/data/ecotrack/ecotrack.log");
        assert_eq!(warn_on_failure(Ok(path.clone())), Some(path));
    }
}
