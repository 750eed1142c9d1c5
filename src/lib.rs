//! Interprocess mutual exclusion keyed by filesystem paths

pub mod error;
pub mod lock;

pub use error::{FileMutexError, Result};
pub use lock::{ExclusiveGuard, FileMutex, LockMode, SharableGuard};
