mod flock;
mod guard;
mod mutex;
mod path;

pub use flock::LockMode;
pub use guard::{ExclusiveGuard, SharableGuard};
pub use mutex::FileMutex;
pub use path::{derive_lock_path, DEFAULT_SUFFIX};
