use crate::lock::mutex::FileMutex;

/// Scoped exclusive ownership of a [`FileMutex`].
///
/// Releases the claim on drop, covering early returns and unwinding.
/// Release failures during drop are ignored; callers that need to observe
/// them should call [`FileMutex::unlock`] directly instead of using a
/// guard. Do not mix a guard with a manual unlock of the same claim.
#[derive(Debug)]
pub struct ExclusiveGuard<'a> {
    mutex: &'a FileMutex,
}

impl<'a> ExclusiveGuard<'a> {
    pub(crate) fn new(mutex: &'a FileMutex) -> Self {
        ExclusiveGuard { mutex }
    }

    /// The mutex this guard holds.
    pub fn mutex(&self) -> &FileMutex {
        self.mutex
    }
}

impl Drop for ExclusiveGuard<'_> {
    fn drop(&mut self) {
        let _ = self.mutex.unlock();
    }
}

/// Scoped sharable ownership of a [`FileMutex`]. Releases one sharable
/// claim on drop.
#[derive(Debug)]
pub struct SharableGuard<'a> {
    mutex: &'a FileMutex,
}

impl<'a> SharableGuard<'a> {
    pub(crate) fn new(mutex: &'a FileMutex) -> Self {
        SharableGuard { mutex }
    }

    /// The mutex this guard holds.
    pub fn mutex(&self) -> &FileMutex {
        self.mutex
    }
}

impl Drop for SharableGuard<'_> {
    fn drop(&mut self) {
        let _ = self.mutex.unlock_sharable();
    }
}
