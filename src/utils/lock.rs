//! Exclusive lock file guarding read-modify-write cycles on flat files.
//!
//! The holder's PID is written into `<file>.lock`. A lock whose PID is no
//! longer running, or which is older than [`STALE_AFTER`], is taken over.

use crate::errors::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, warn};

const RETRIES: u32 = 50;
const RETRY_DELAY: Duration = Duration::from_millis(100);
const MAX_TAKEOVERS: u32 = 3;

/// No write holds the lock this long.
pub const STALE_AFTER: Duration = Duration::from_secs(10 * 60);

/// Held while a process owns `<file>.lock`. Released on drop.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl FileLock {
    /// Create `<target>.lock`, waiting up to ~5s for another holder to finish.
    pub fn acquire(target: &Path) -> AppResult<Self> {
        Self::acquire_with_retries(target, RETRIES)
    }

    fn acquire_with_retries(target: &Path, retries: u32) -> AppResult<Self> {
        let path = lock_path(target);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut attempt = 0;
        let mut takeovers = 0;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut f) => {
                    let _ = writeln!(f, "{}", std::process::id());
                    debug!(lock = %path.display(), "lock acquired");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if takeovers < MAX_TAKEOVERS && break_if_stale(&path) {
                        takeovers += 1;
                        continue;
                    }
                    if attempt >= retries {
                        return Err(AppError::Locked(path.display().to_string()));
                    }
                    attempt += 1;
                    thread::sleep(RETRY_DELAY);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

fn lock_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    target.with_file_name(name)
}

fn holder_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn is_running(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    sys.process(pid).is_some()
}

fn is_old(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| SystemTime::now().duration_since(t).ok())
        .is_some_and(|age| age > STALE_AFTER)
}

/// Remove `path` when its holder is gone. A lock with no PID yet (holder
/// between create and write) only goes stale by age.
fn break_if_stale(path: &Path) -> bool {
    let pid = holder_pid(path);
    let dead = pid.is_some_and(|p| !is_running(p));
    if !dead && !is_old(path) {
        return false;
    }

    // another waiter may have replaced it meanwhile
    if holder_pid(path) != pid {
        return false;
    }

    match fs::remove_file(path) {
        Ok(()) => {
            warn!(lock = %path.display(), pid = ?pid, "removed stale lock");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(_) => false,
    }
}
