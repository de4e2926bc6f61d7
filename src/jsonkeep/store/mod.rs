//! # Storage Layer
//!
//! [`JsonStore`] persists one JSON document per file. It is stateless between
//! calls: nothing is cached, every `load` reads the disk and every `save`
//! replaces the file.
//!
//! ## Two Layers
//!
//! - [`JsonStore::try_load`] / [`JsonStore::try_save`] return a [`Result`] and
//!   are what callers that must know about failures should use.
//! - [`JsonStore::load`] / [`JsonStore::save`] never fail. A failed load
//!   behaves like "nothing saved yet" and returns `{}`; a failed save leaves
//!   the previous file in place. Both report through the injected
//!   [`StoreLogger`].
//!
//! ## Write Sequence
//!
//! 1. Serialize to canonical text (see [`format`]). Nothing touches the disk
//!    if this fails.
//! 2. Write a temp file in the target's directory and flush it.
//! 3. Rename it over the target.
//! 4. Remove the temp file if it is still there, whatever happened above.
//!    A failed removal is logged at error level after the primary failure and
//!    never replaces it.
//!
//! Concurrent saves to one path are not serialized here. The rename keeps the
//! file whole; which writer wins is up to the filesystem.

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::log::{StoreLogger, TracingLogger};
use crate::model::{empty_document, Document};
use serde::Serialize;
use std::error::Error as StdError;
use std::fs as stdfs;
use std::io;
use std::path::Path;

pub mod format;
pub mod fs;

use self::fs::TempFile;

pub struct JsonStore<L: StoreLogger = TracingLogger> {
    config: StoreConfig,
    logger: L,
}

impl JsonStore<TracingLogger> {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            logger: TracingLogger,
        }
    }
}

impl Default for JsonStore<TracingLogger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: StoreLogger> JsonStore<L> {
    pub fn with_logger(config: StoreConfig, logger: L) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Reads and parses the document at `path`.
    pub fn try_load(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let content = stdfs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`try_load`](Self::try_load), but any failure yields `{}`.
    pub fn load(&self, path: impl AsRef<Path>) -> Document {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(doc) => doc,
            Err(err) => {
                self.logger
                    .debug(&format!("Loading {} failed: {}", path.display(), err));
                empty_document()
            }
        }
    }

    /// Atomically replaces the file at `path` with `data`.
    pub fn try_save<T: Serialize + ?Sized>(&self, path: impl AsRef<Path>, data: &T) -> Result<()> {
        self.try_save_with(path.as_ref(), data, TempFile::remove)
    }

    /// Like [`try_save`](Self::try_save), but failures are only logged.
    /// Returns whether the new document is now on disk.
    pub fn save<T: Serialize + ?Sized>(&self, path: impl AsRef<Path>, data: &T) -> bool {
        self.save_with(path.as_ref(), data, TempFile::remove)
    }

    fn try_save_with<T, R>(&self, path: &Path, data: &T, remove: R) -> Result<()>
    where
        T: Serialize + ?Sized,
        R: FnOnce(&TempFile) -> io::Result<bool>,
    {
        let (outcome, cleanup) = self.write_document(path, data, remove);
        if let Some(err) = cleanup {
            self.log_cleanup_failure(&err);
        }
        outcome
    }

    fn save_with<T, R>(&self, path: &Path, data: &T, remove: R) -> bool
    where
        T: Serialize + ?Sized,
        R: FnOnce(&TempFile) -> io::Result<bool>,
    {
        let (outcome, cleanup) = self.write_document(path, data, remove);

        let saved = match outcome {
            Ok(()) => true,
            Err(err) => {
                self.logger.error(&format!(
                    "Failed to serialize to JSON: {}: {}",
                    path.display(),
                    error_chain(&err)
                ));
                false
            }
        };
        if let Some(err) = cleanup {
            self.log_cleanup_failure(&err);
        }
        saved
    }

    /// Runs the write sequence. The second element is a failure to remove a
    /// leftover temp file, reported separately from the write outcome.
    fn write_document<T, R>(&self, path: &Path, data: &T, remove: R) -> (Result<()>, Option<io::Error>)
    where
        T: Serialize + ?Sized,
        R: FnOnce(&TempFile) -> io::Result<bool>,
    {
        let text = match format::to_canonical_string(data) {
            Ok(text) => text,
            Err(err) => return (Err(err), None),
        };

        let mut staged: Option<TempFile> = None;
        let outcome = fs::replace_atomic(path, text.as_bytes(), &self.config, &mut staged);

        let cleanup = staged.and_then(|tmp| remove(&tmp).err());
        (outcome, cleanup)
    }

    fn log_cleanup_failure(&self, err: &io::Error) {
        self.logger
            .error(&format!("JSON replacement cleanup failed: {}", err));
    }
}

fn error_chain(err: &StoreError) -> String {
    let mut text = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
