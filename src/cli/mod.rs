mod args;
mod remove_command;
mod write_command;

use file_mutex::Result;
pub use args::{Args, Command};

/// Exit code when the lock could not be acquired (contention or timeout).
pub const EXIT_LOCKED: i32 = 2;

pub fn run(args: Args) -> Result<i32> {
    match args.command {
        Some(cmd @ Command::Remove { .. }) => remove_command::execute_remove(cmd),
        None => write_command::execute_write(args),
    }
}
