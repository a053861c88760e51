// Rust guideline compliant 2026-02-06

//! File-backed storage for progress records.
//!
//! Each run id maps to one pretty-printed JSON file inside the store
//! directory. Writes go through a temp file and an atomic rename, and
//! [`RecordStore::with_lock`] serializes invocations of the same run across
//! processes.

use crate::{Error, ProgressRecord, Result};
use std::path::{Path, PathBuf};

/// Directory of persisted progress records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Creates a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Store directory cannot be empty",
            )));
        }
        Ok(Self { dir })
    }

    /// Returns the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path that holds the record for `run_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRunId`] if the id is empty or contains
    /// characters other than ASCII alphanumerics, `_`, `-`, and `.`, or is
    /// made of dots only.
    pub fn path_for(&self, run_id: &str) -> Result<PathBuf> {
        validate_run_id(run_id)?;
        Ok(self.dir.join(format!("{run_id}.json")))
    }

    /// Loads the record for `run_id`.
    ///
    /// A missing file yields a fresh record, since the host creates the
    /// record before the first invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The run id is invalid
    /// - The file exists but cannot be read
    /// - The file does not contain a valid record
    pub fn load(&self, run_id: &str) -> Result<ProgressRecord> {
        let path = self.path_for(run_id)?;
        if !path.exists() {
            return Ok(ProgressRecord::new());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Returns true if a record has been saved for `run_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the run id is invalid.
    pub fn exists(&self, run_id: &str) -> Result<bool> {
        Ok(self.path_for(run_id)?.exists())
    }

    /// Saves the record for `run_id` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The run id is invalid
    /// - A host key shadows a typed field ([`Error::ReservedKey`])
    /// - The directory or temp file cannot be written
    /// - The rename fails
    pub fn save(&self, run_id: &str, record: &ProgressRecord) -> Result<()> {
        use std::fs::File;
        use std::io::Write;

        let path = self.path_for(run_id)?;
        record.validate()?;
        std::fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            let json = serde_json::to_string_pretty(record)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Deletes the record for `run_id` together with its lock file.
    ///
    /// May be called while holding the lock from [`RecordStore::with_lock`].
    ///
    /// # Returns
    ///
    /// `true` if a record was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the run id is invalid or a file cannot be removed.
    pub fn delete(&self, run_id: &str) -> Result<bool> {
        let path = self.path_for(run_id)?;
        remove_if_present(&path.with_extension("lock"))?;
        remove_if_present(&path)
    }

    /// Executes a closure while holding an exclusive lock for `run_id`.
    ///
    /// The lock is not waited for: if another invocation of the same run
    /// holds it, this fails immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The run id is invalid
    /// - The lock file cannot be created
    /// - The lock is held elsewhere ([`Error::Locked`])
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, run_id: &str, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path_for(run_id)?.with_extension("lock");
        std::fs::create_dir_all(&self.dir)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| Error::Locked(run_id.to_string()))?;

        let result = f();

        // Released on drop as well; an unlock failure must not mask the result.
        let _ = lock_file.unlock();

        result
    }
}

fn remove_if_present(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn validate_run_id(run_id: &str) -> Result<()> {
    let valid_chars = run_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if run_id.is_empty() || !valid_chars || run_id.chars().all(|c| c == '.') {
        return Err(Error::InvalidRunId(run_id.to_string()));
    }
    Ok(())
}
