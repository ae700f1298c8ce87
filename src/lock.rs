//! File-based locking to prevent concurrent update runs.
//!
//! Two simultaneous updates could otherwise race on the artifact rename.
//! Uses flock-style advisory locking; the lock is released on drop.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// A guard holding an exclusive lock on the Phalanx lock file.
pub struct LockGuard {
    _file: File,
}

impl LockGuard {
    /// Acquire an exclusive lock at `lock_path`, conventionally placed next
    /// to the artifact the lock protects. Returns an error if another
    /// instance is already running.
    ///
    /// Opens with create+read+write (no truncate) so there is no race
    /// between file creation and lock acquisition.
    pub fn acquire_at(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).ok();
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .with_context(|| format!("Failed to open lock file: {:?}", lock_path))?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow::anyhow!(
                "Another instance of Phalanx is already running.\n\
                 If you believe this is an error, remove the lock file: {:?}",
                lock_path
            )
        })?;

        Ok(Self { _file: file })
    }
}
