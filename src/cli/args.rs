use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "file-mutex",
    version,
    about = "Append tagged lines to a file under interprocess file locking",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target file path (required if no subcommand)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tag written with every appended line
    #[arg(value_name = "TAG")]
    pub tag: Option<String>,

    /// Acquire sharable (reader) ownership instead of exclusive
    #[arg(long)]
    pub sharable: bool,

    /// Fail immediately if locked
    #[arg(long, conflicts_with = "timeout")]
    pub no_wait: bool,

    /// Give up after this many seconds if locked
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Lock file suffix
    #[arg(long, value_name = "SUFFIX", default_value = ".lock")]
    pub suffix: String,

    /// Number of lines to append
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = 10)]
    pub count: u32,

    /// Pause between lines in milliseconds
    #[arg(long, value_name = "MILLIS", default_value_t = 1000)]
    pub interval_ms: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove the lock file derived from a target path
    Remove {
        /// Target file path whose lock file should be removed
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Lock file suffix
        #[arg(long, value_name = "SUFFIX", default_value = ".lock")]
        suffix: String,
    },
}
