use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::error::{FileMutexError, Result};
use crate::lock::flock;
use crate::lock::guard::{ExclusiveGuard, SharableGuard};
use crate::lock::path::{derive_lock_path, DEFAULT_SUFFIX};
use crate::lock::LockMode;

/// Interprocess mutual exclusion keyed by a filesystem path.
///
/// Construction derives a companion lock file (`<target><suffix>`), creates
/// it if absent, and keeps it open; every locking operation acts on the OS
/// advisory lock of that file. Exclusive ownership excludes all other
/// holders, sharable ownership excludes only an exclusive holder, and
/// cooperating processes contend by constructing over the same target and
/// suffix.
///
/// The advisory lock coordinates *processes*. Threads of one process sharing
/// a single instance get no mutual exclusion from it and need their own
/// in-process synchronization. Fairness among waiters is whatever the host
/// OS provides; exclusive waiters can starve under sustained sharable
/// contention.
///
/// The instance owns its OS handle alone and is move-only. Dropping it
/// releases any claim still held (the handle closes); the lock file itself
/// persists on disk until [`FileMutex::remove`] deletes it.
#[derive(Debug)]
pub struct FileMutex {
    file: File,
    lock_path: PathBuf,
}

impl FileMutex {
    /// Create a mutex over `target` with the default `.lock` suffix.
    pub fn new(target: impl AsRef<Path>) -> Result<Self> {
        Self::with_suffix(target, DEFAULT_SUFFIX)
    }

    /// Create a mutex over `target`, locking on `<target><suffix>`.
    ///
    /// The lock file is created if missing (opened for append) and is
    /// reusable across process runs.
    pub fn with_suffix(target: impl AsRef<Path>, suffix: &str) -> Result<Self> {
        let lock_path = derive_lock_path(target.as_ref(), suffix);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&lock_path)
            .map_err(|source| FileMutexError::LockFileCreationFailed {
                path: lock_path.clone(),
                source,
            })?;

        debug!("Lock file opened: {}", lock_path.display());

        Ok(FileMutex { file, lock_path })
    }

    /// Path of the companion lock file.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Block until exclusive ownership is obtained.
    ///
    /// Contention blocks, it never errors; only OS-level failures do.
    pub fn lock(&self) -> Result<()> {
        flock::acquire(&self.file, &self.lock_path, LockMode::Exclusive)?;
        debug!("Exclusive lock acquired: {}", self.lock_path.display());
        Ok(())
    }

    /// Attempt exclusive ownership without blocking.
    ///
    /// Returns `false` when another holder (exclusive or sharable) exists,
    /// leaving that holder's ownership untouched.
    pub fn try_lock(&self) -> Result<bool> {
        let acquired = flock::try_acquire(&self.file, &self.lock_path, LockMode::Exclusive)?;
        if acquired {
            debug!("Exclusive lock acquired: {}", self.lock_path.display());
        }
        Ok(acquired)
    }

    /// Attempt exclusive ownership until `deadline`.
    ///
    /// Returns `true` if acquired before the deadline, `false` once it
    /// elapses without acquisition. Never acquires and then reports `false`.
    pub fn timed_lock(&self, deadline: Instant) -> Result<bool> {
        let acquired =
            flock::acquire_until(&self.file, &self.lock_path, LockMode::Exclusive, deadline)?;
        if acquired {
            debug!("Exclusive lock acquired: {}", self.lock_path.display());
        } else {
            debug!("Exclusive lock deadline elapsed: {}", self.lock_path.display());
        }
        Ok(acquired)
    }

    /// Release exclusive ownership.
    ///
    /// Precondition: the caller holds exclusive ownership. Without it the
    /// call passes straight through to the OS and its effect is undefined
    /// (most platforms treat it as a no-op).
    pub fn unlock(&self) -> Result<()> {
        flock::release(&self.file, &self.lock_path, LockMode::Exclusive)?;
        debug!("Exclusive lock released: {}", self.lock_path.display());
        Ok(())
    }

    /// Block until sharable ownership is obtained. Waits only on an
    /// exclusive holder; other sharable holders coexist.
    pub fn lock_sharable(&self) -> Result<()> {
        flock::acquire(&self.file, &self.lock_path, LockMode::Sharable)?;
        debug!("Sharable lock acquired: {}", self.lock_path.display());
        Ok(())
    }

    /// Attempt sharable ownership without blocking. Returns `false` only
    /// when an exclusive holder exists.
    pub fn try_lock_sharable(&self) -> Result<bool> {
        let acquired = flock::try_acquire(&self.file, &self.lock_path, LockMode::Sharable)?;
        if acquired {
            debug!("Sharable lock acquired: {}", self.lock_path.display());
        }
        Ok(acquired)
    }

    /// Attempt sharable ownership until `deadline`.
    pub fn timed_lock_sharable(&self, deadline: Instant) -> Result<bool> {
        let acquired =
            flock::acquire_until(&self.file, &self.lock_path, LockMode::Sharable, deadline)?;
        if acquired {
            debug!("Sharable lock acquired: {}", self.lock_path.display());
        } else {
            debug!("Sharable lock deadline elapsed: {}", self.lock_path.display());
        }
        Ok(acquired)
    }

    /// Release sharable ownership.
    ///
    /// Precondition: the caller holds sharable ownership.
    pub fn unlock_sharable(&self) -> Result<()> {
        flock::release(&self.file, &self.lock_path, LockMode::Sharable)?;
        debug!("Sharable lock released: {}", self.lock_path.display());
        Ok(())
    }

    /// Block for exclusive ownership, returning a guard that releases it on
    /// drop on every exit path.
    pub fn lock_scoped(&self) -> Result<ExclusiveGuard<'_>> {
        self.lock()?;
        Ok(ExclusiveGuard::new(self))
    }

    /// Non-blocking scoped variant; `None` when another holder exists.
    pub fn try_lock_scoped(&self) -> Result<Option<ExclusiveGuard<'_>>> {
        Ok(self.try_lock()?.then(|| ExclusiveGuard::new(self)))
    }

    /// Deadline-bounded scoped variant; `None` once the deadline elapses.
    pub fn timed_lock_scoped(&self, deadline: Instant) -> Result<Option<ExclusiveGuard<'_>>> {
        Ok(self.timed_lock(deadline)?.then(|| ExclusiveGuard::new(self)))
    }

    /// Block for sharable ownership, returning a guard that releases it on
    /// drop.
    pub fn lock_sharable_scoped(&self) -> Result<SharableGuard<'_>> {
        self.lock_sharable()?;
        Ok(SharableGuard::new(self))
    }

    /// Non-blocking sharable scoped variant.
    pub fn try_lock_sharable_scoped(&self) -> Result<Option<SharableGuard<'_>>> {
        Ok(self.try_lock_sharable()?.then(|| SharableGuard::new(self)))
    }

    /// Deadline-bounded sharable scoped variant.
    pub fn timed_lock_sharable_scoped(
        &self,
        deadline: Instant,
    ) -> Result<Option<SharableGuard<'_>>> {
        Ok(self
            .timed_lock_sharable(deadline)?
            .then(|| SharableGuard::new(self)))
    }

    /// Remove the lock file derived from `target` with the default suffix.
    pub fn remove(target: impl AsRef<Path>) -> Result<bool> {
        Self::remove_with_suffix(target, DEFAULT_SUFFIX)
    }

    /// Remove `<target><suffix>`.
    ///
    /// Returns `false` when the file did not exist, `true` when it was
    /// deleted. No check is made for current holders; deletion follows the
    /// host OS's semantics for open files, so on POSIX systems an existing
    /// holder keeps a valid handle to the unlinked file while new
    /// contenders lock a fresh one.
    pub fn remove_with_suffix(target: impl AsRef<Path>, suffix: &str) -> Result<bool> {
        let path = derive_lock_path(target.as_ref(), suffix);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Lock file removed: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(FileMutexError::RemoveFailed { path, source }),
        }
    }
}

impl Drop for FileMutex {
    fn drop(&mut self) {
        // Closing the handle releases any still-held claim.
        // The lock file is NOT deleted - it persists for future contenders.
        debug!("Lock handle closed (file persists): {}", self.lock_path.display());
    }
}
