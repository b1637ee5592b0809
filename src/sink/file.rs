//! Append-only log file, one record per line.

use super::Sink;
use crate::internal;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Appends each record to a file, creating it and its parent directories on demand.
///
/// The file is opened per write so external rotation (`mv` + new file) is picked
/// up without a restart.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSink {
    /// `~` in `path` is expanded against the user's home directory.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: resolve_path(path.as_ref()),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), crate::Error> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }
        match fs::create_dir_all(parent) {
            Ok(()) => {
                internal::debug("FILE", &format!("Created directory: {}", parent.display()));
                Ok(())
            }
            Err(e) => {
                internal::error(
                    "FILE",
                    &format!("Failed to create directory {}: {e}", parent.display()),
                );
                Err(e.into())
            }
        }
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.as_ref())
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        self.ensure_parent()?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buf.as_bytes())?;
        Ok(())
    }
}
