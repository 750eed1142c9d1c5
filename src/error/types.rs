use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::lock::LockMode;

#[derive(Debug, Error)]
pub enum FileMutexError {
    #[error("Failed to create lock file {path}: {source}")]
    LockFileCreationFailed { path: PathBuf, source: io::Error },

    #[error("Failed to acquire {mode} lock on {path}: {source}")]
    LockAcquisitionFailed {
        path: PathBuf,
        mode: LockMode,
        source: io::Error,
    },

    #[error("Failed to release {mode} lock on {path}: {source}")]
    LockReleaseFailed {
        path: PathBuf,
        mode: LockMode,
        source: io::Error,
    },

    #[error("Failed to remove lock file {path}: {source}")]
    RemoveFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FileMutexError>;
