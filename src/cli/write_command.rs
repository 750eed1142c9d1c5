use std::fs::OpenOptions;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use clap::error::ErrorKind;
use clap::CommandFactory;
use file_mutex::{ExclusiveGuard, FileMutex, Result, SharableGuard};

use super::args::Args;
use super::EXIT_LOCKED;

enum HeldGuard<'a> {
    Exclusive(#[allow(dead_code)] ExclusiveGuard<'a>),
    Sharable(#[allow(dead_code)] SharableGuard<'a>),
}

fn acquire<'a>(mutex: &'a FileMutex, args: &Args) -> Result<Option<HeldGuard<'a>>> {
    if args.sharable {
        let guard = if args.no_wait {
            mutex.try_lock_sharable_scoped()?
        } else if let Some(secs) = args.timeout {
            mutex.timed_lock_sharable_scoped(Instant::now() + Duration::from_secs(secs))?
        } else {
            Some(mutex.lock_sharable_scoped()?)
        };
        Ok(guard.map(HeldGuard::Sharable))
    } else {
        let guard = if args.no_wait {
            mutex.try_lock_scoped()?
        } else if let Some(secs) = args.timeout {
            mutex.timed_lock_scoped(Instant::now() + Duration::from_secs(secs))?
        } else {
            Some(mutex.lock_scoped()?)
        };
        Ok(guard.map(HeldGuard::Exclusive))
    }
}

pub fn execute_write(args: Args) -> Result<i32> {
    let (target, tag) = match (&args.file, &args.tag) {
        (Some(file), Some(tag)) => (file.clone(), tag.clone()),
        _ => {
            let mut cmd = Args::command();
            cmd.error(
                ErrorKind::MissingRequiredArgument,
                "FILE and TAG are required unless a subcommand is given",
            )
            .exit()
        }
    };

    let mutex = FileMutex::with_suffix(&target, &args.suffix)?;

    let Some(_guard) = acquire(&mutex, &args)? else {
        eprintln!(
            "Lock is held by another process: {}",
            mutex.lock_path().display()
        );
        return Ok(EXIT_LOCKED);
    };

    let mut out = OpenOptions::new().create(true).append(true).open(&target)?;

    for i in 0..args.count {
        println!("Writing {} {}", i, tag);
        writeln!(out, "{}", tag)?;
        if args.interval_ms > 0 && i + 1 < args.count {
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    Ok(0)
}
