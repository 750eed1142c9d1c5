use file_mutex::{FileMutex, Result};

use super::args::Command;

pub fn execute_remove(cmd: Command) -> Result<i32> {
    let Command::Remove { file, suffix } = cmd;

    if FileMutex::remove_with_suffix(&file, &suffix)? {
        println!("Removed lock file for {}", file.display());
    } else {
        println!("No lock file for {}", file.display());
    }

    Ok(0)
}
