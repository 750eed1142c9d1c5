use file_mutex::FileMutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_exclusive_guard_releases_on_drop() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data.txt");

    let mutex = FileMutex::new(&target).unwrap();
    let contender = FileMutex::new(&target).unwrap();

    let guard = mutex.lock_scoped().unwrap();
    assert_eq!(guard.mutex().lock_path(), mutex.lock_path());
    assert!(!contender.try_lock().unwrap());

    drop(guard);
    assert!(contender.try_lock().unwrap());
    contender.unlock().unwrap();
}

#[test]
fn test_try_lock_scoped_contended_returns_none() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data.txt");

    let holder = FileMutex::new(&target).unwrap();
    let _held = holder.lock_scoped().unwrap();

    let contender = FileMutex::new(&target).unwrap();
    assert!(contender.try_lock_scoped().unwrap().is_none());
}

#[test]
fn test_timed_lock_scoped_uncontended() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data.txt");

    let mutex = FileMutex::new(&target).unwrap();
    let guard = mutex
        .timed_lock_scoped(Instant::now() + Duration::from_secs(5))
        .unwrap();
    assert!(guard.is_some());
}

#[test]
fn test_guard_releases_on_panic() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data.txt");

    let mutex = FileMutex::new(&target).unwrap();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _guard = mutex.lock_scoped().unwrap();
        panic!("poisoned critical section");
    }));
    assert!(result.is_err());

    let contender = FileMutex::new(&target).unwrap();
    assert!(contender.try_lock().unwrap());
    contender.unlock().unwrap();
}

#[test]
fn test_sharable_guards_coexist_and_release() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("data.txt");

    let first = FileMutex::new(&target).unwrap();
    let second = FileMutex::new(&target).unwrap();
    let writer = FileMutex::new(&target).unwrap();

    let first_guard = first.lock_sharable_scoped().unwrap();
    let second_guard = second.try_lock_sharable_scoped().unwrap();
    assert!(second_guard.is_some());

    assert!(!writer.try_lock().unwrap());

    drop(first_guard);
    drop(second_guard);
    assert!(writer.try_lock().unwrap());
    writer.unlock().unwrap();
}
