use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;
use rand::Rng;

use crate::error::{FileMutexError, Result};

/// Ownership mode requested from the OS advisory-locking facility.
///
/// Exclusive ownership excludes every other holder; sharable ownership
/// excludes only an exclusive holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Sharable,
    Exclusive,
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMode::Sharable => f.write_str("sharable"),
            LockMode::Exclusive => f.write_str("exclusive"),
        }
    }
}

/// Check if an I/O error indicates lock contention (file locked by another process)
fn is_lock_contention(e: &io::Error) -> bool {
    // Check for WouldBlock (Unix)
    if e.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    // Check for Windows-specific lock errors
    // ERROR_LOCK_VIOLATION (33) - file region is locked
    // ERROR_SHARING_VIOLATION (32) - file in use by another process
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        if code == 33 || code == 32 {
            return true;
        }
    }
    false
}

const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(10);
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(1000);

fn lock_op(file: &File, mode: LockMode) -> io::Result<()> {
    match mode {
        LockMode::Sharable => file.lock_shared(),
        LockMode::Exclusive => file.lock_exclusive(),
    }
}

fn try_lock_op(file: &File, mode: LockMode) -> io::Result<()> {
    match mode {
        LockMode::Sharable => FileExt::try_lock_shared(file),
        LockMode::Exclusive => FileExt::try_lock_exclusive(file),
    }
}

fn acquisition_failed(path: &Path, mode: LockMode, source: io::Error) -> FileMutexError {
    FileMutexError::LockAcquisitionFailed {
        path: path.to_path_buf(),
        mode,
        source,
    }
}

/// Block until ownership in `mode` is granted.
pub(crate) fn acquire(file: &File, path: &Path, mode: LockMode) -> Result<()> {
    lock_op(file, mode).map_err(|e| acquisition_failed(path, mode, e))
}

/// Attempt ownership in `mode` without blocking. Returns `false` on
/// contention; errors only on OS failures distinct from contention.
pub(crate) fn try_acquire(file: &File, path: &Path, mode: LockMode) -> Result<bool> {
    match try_lock_op(file, mode) {
        Ok(()) => Ok(true),
        Err(e) if is_lock_contention(&e) => Ok(false),
        Err(e) => Err(acquisition_failed(path, mode, e)),
    }
}

/// Poll for ownership in `mode` until `deadline`, sleeping between attempts
/// with exponential backoff plus jitter. Returns `false` once the deadline
/// elapses without acquisition; a deadline already in the past degrades to a
/// single attempt.
pub(crate) fn acquire_until(
    file: &File,
    path: &Path,
    mode: LockMode,
    deadline: Instant,
) -> Result<bool> {
    let mut current_interval = INITIAL_POLL_INTERVAL;
    let mut rng = rand::thread_rng();

    loop {
        match try_lock_op(file, mode) {
            Ok(()) => return Ok(true),
            Err(e) if is_lock_contention(&e) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(false);
                }

                // Sleep with backoff + jitter, never past the deadline
                let jitter = Duration::from_millis(rng.gen_range(0..25));
                let sleep_time = (current_interval + jitter).min(deadline - now);
                std::thread::sleep(sleep_time);

                // Exponential backoff for next iteration (1.5x multiplier)
                current_interval = Duration::from_millis(
                    ((current_interval.as_millis() as f64 * 1.5) as u64)
                        .min(MAX_POLL_INTERVAL.as_millis() as u64),
                );
            }
            Err(e) => return Err(acquisition_failed(path, mode, e)),
        }
    }
}

/// Release ownership held in `mode`.
///
/// fs2 exposes a single unlock for both modes; the mode is kept for error
/// reporting.
pub(crate) fn release(file: &File, path: &Path, mode: LockMode) -> Result<()> {
    file.unlock()
        .map_err(|source| FileMutexError::LockReleaseFailed {
            path: path.to_path_buf(),
            mode,
            source,
        })
}
