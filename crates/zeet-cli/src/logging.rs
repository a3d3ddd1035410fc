//! Logging setup
//!
//! The splash owns the screen, so logs go to a file, never the terminal.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "zeet=info,zeet_core=info";
const VERBOSE_FILTER: &str = "zeet=debug,zeet_core=debug";

/// `<data local dir>/zeet/zeet.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("zeet").join("zeet.log"))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns the log path, or None when no
/// file could be opened (logging is then disabled).
pub fn init_logging(log_file: Option<&Path>, verbose: bool) -> Option<PathBuf> {
    let path = log_file.map(Path::to_path_buf).or_else(default_log_path)?;
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("zeet: logging disabled, cannot open {}: {}", path.display(), e);
            return None;
        }
    };

    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init();
    if installed.is_err() {
        return None;
    }

    tracing::debug!(path = %path.display(), "Logging initialized");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("zeet.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
