//! git::lock
//!
//! Exclusive cross-process lock for the working copy.
//!
//! # Architecture
//!
//! The in-process mutex in the service layer serializes transactions within
//! one server. This lock covers the other failure mode: two server processes
//! accidentally configured to share one clone directory. The second process
//! fails at startup instead of corrupting the working copy.
//!
//! The lock file is a *sibling* of the clone directory (`<dir>.lock`), not
//! inside it, because a fresh clone requires the target directory to be
//! empty or absent.
//!
//! # Invariants
//!
//! - Lock is held for the whole process lifetime
//! - Lock is released on drop (RAII pattern)
//! - Acquisition is non-blocking (fails fast if locked)

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("working copy is locked by another process")]
    AlreadyLocked,

    /// Failed to create the lock file or its directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// An exclusive lock guarding a clone directory.
///
/// Released automatically when dropped, so the lock outlives panics only
/// as long as the OS keeps the file handle open.
#[derive(Debug)]
pub struct WorkdirLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl WorkdirLock {
    /// Attempt to lock the given clone directory.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// Non-blocking: if another process holds the lock, this returns
    /// [`LockError::AlreadyLocked`] immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(clone_dir: &Path) -> Result<Self, LockError> {
        let path = Self::lock_path(clone_dir)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {e}", path.display()))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Compute the sibling lock path for a clone directory.
    fn lock_path(clone_dir: &Path) -> Result<PathBuf, LockError> {
        let name = clone_dir.file_name().ok_or_else(|| {
            LockError::CreateFailed(format!(
                "clone directory {} has no name to lock",
                clone_dir.display()
            ))
        })?;
        let mut lock_name = name.to_os_string();
        lock_name.push(".lock");
        Ok(clone_dir.with_file_name(lock_name))
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// Called automatically on drop; safe to call more than once.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for WorkdirLock {
    fn drop(&mut self) {
        // Best-effort release on drop - ignore errors since we're dropping
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}
