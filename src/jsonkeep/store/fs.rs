//! Atomic file replacement.
//!
//! A write goes to a uniquely named file next to the target, is flushed (and
//! optionally fsynced), and is then renamed over the target. The rename is a
//! single step on one filesystem, so readers see either the old file or the
//! new one, never a truncated mix.
//!
//! ```text
//! dir/
//! ├── state.json                      # target, replaced in one rename
//! └── .state.json.<uuid>.tmp          # exists only while a write is in flight
//! ```
//!
//! Removing a temp file that was never renamed is the caller's job, see
//! [`TempFile::remove`]; the store does it so it can log a failed removal.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const TMP_SUFFIX: &str = ".tmp";

/// A scratch file created beside the target it will replace.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Creates an empty, exclusively owned temp file in `dir` for `target`.
    pub fn create_for(dir: &Path, target: &Path) -> Result<(TempFile, File)> {
        let name = target
            .file_name()
            .ok_or_else(|| StoreError::InvalidPath(target.to_path_buf()))?;
        let path = dir.join(format!(
            ".{}.{}{}",
            name.to_string_lossy(),
            Uuid::new_v4(),
            TMP_SUFFIX
        ));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(&path).map_err(|e| StoreError::io(&path, e))?;
        Ok((TempFile { path }, file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all of `contents` and closes the handle.
    pub fn fill(&self, mut file: File, contents: &[u8], sync: bool) -> Result<()> {
        file.write_all(contents)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.flush().map_err(|e| StoreError::io(&self.path, e))?;
        if sync {
            file.sync_all().map_err(|e| StoreError::io(&self.path, e))?;
        }
        drop(file);
        Ok(())
    }

    /// Renames the temp file over `target`.
    pub fn persist(&self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(|e| StoreError::io(target, e))
    }

    /// Deletes the temp file if it is still there. `Ok(false)` means a
    /// successful rename already consumed it.
    pub fn remove(&self) -> io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Directory a temp file for `target` must live in.
pub fn target_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replaces `target` with `contents` in one visible step.
///
/// The temp file, once created, is handed to `staged` so the caller can clean
/// it up whatever the outcome.
pub fn replace_atomic(
    target: &Path,
    contents: &[u8],
    config: &StoreConfig,
    staged: &mut Option<TempFile>,
) -> Result<()> {
    if target.file_name().is_none() {
        return Err(StoreError::InvalidPath(target.to_path_buf()));
    }

    let dir = target_dir(target);
    if !dir.exists() {
        if !config.create_dirs {
            return Err(StoreError::MissingDirectory(dir));
        }
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    }

    let (tmp, file) = TempFile::create_for(&dir, target)?;
    let tmp = staged.insert(tmp);
    tmp.fill(file, contents, config.sync)?;
    tmp.persist(target)?;

    if config.sync {
        sync_dir(&dir);
    }
    Ok(())
}

/// Makes the rename itself durable. Best effort: not every platform lets a
/// directory be opened and synced.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
            tracing::debug!(target: "jsonkeep::store", "fsync of {} skipped: {}", dir.display(), e);
        }
    }
    #[cfg(not(unix))]
    let _ = dir;
}

/// True if `name` looks like a temp file this module creates.
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TMP_SUFFIX)
}
