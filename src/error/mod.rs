mod types;

pub use types::{FileMutexError, Result};
