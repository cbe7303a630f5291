//! Single-instance guard
//!
//! A PID file at ~/.text-typer/text-typer.pid marks the running instance.
//! Acquiring fails only when the file names a live process, other than this
//! one, running under this executable's process name. Missing, unparseable
//! or stale files are taken over, including ones whose PID the OS has since
//! handed to an unrelated program.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::error::{Result, TextTyperError};
use crate::logging;

/// Default PID file location
pub fn default_pid_path() -> PathBuf {
    logging::app_dir().join("text-typer.pid")
}

/// Held for the lifetime of the process. Removes the PID file on drop.
#[derive(Debug)]
pub struct InstanceGuard {
    path: PathBuf,
}

impl InstanceGuard {
    /// Claim the PID file at `path`.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let own_name = process_name(std::process::id());
        Self::acquire_as(path, own_name.as_deref())
    }

    /// Claim the PID file, treating a live process as another instance only
    /// when its name is `own_name`. With no name to compare, any live
    /// process blocks.
    fn acquire_as(path: impl Into<PathBuf>, own_name: Option<&OsStr>) -> Result<Self> {
        let path = path.into();
        let own_pid = std::process::id();

        if let Some(pid) = read_pid(&path) {
            if pid != own_pid && is_instance_running(pid, own_name) {
                logging::log("APP", &format!("Instance already running with PID {}", pid));
                return Err(TextTyperError::AlreadyRunning { pid });
            }
            logging::log("APP", &format!("Taking over stale PID file (PID {})", pid));
        }

        let lock_err = |source| TextTyperError::InstanceLock {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(lock_err)?;
            }
        }
        fs::write(&path, own_pid.to_string()).map_err(lock_err)?;

        logging::log(
            "APP",
            &format!("Wrote PID {} to {}", own_pid, path.display()),
        );
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        // Only remove the file if it still names us
        if read_pid(&self.path) == Some(std::process::id()) {
            if let Err(e) = fs::remove_file(&self.path) {
                logging::log("APP", &format!("Failed to remove PID file: {}", e));
            }
        }
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn process_name(pid: u32) -> Option<OsString> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    system.process(pid).map(|process| process.name().to_os_string())
}

fn is_instance_running(pid: u32, own_name: Option<&OsStr>) -> bool {
    match (process_name(pid), own_name) {
        (Some(name), Some(own)) => name == own,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parent_pid() -> Option<u32> {
        let own = Pid::from_u32(std::process::id());
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[own]),
            true,
            ProcessRefreshKind::nothing(),
        );
        system.process(own)?.parent().map(|p| p.as_u32())
    }

    /// A live process other than this one, with its name.
    fn live_foreign_process() -> Option<(u32, OsString)> {
        let pid = parent_pid()?;
        Some((pid, process_name(pid)?))
    }

    #[test]
    fn acquire_writes_own_pid_and_drop_removes_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");

        let guard = InstanceGuard::acquire(&path).unwrap();
        assert_eq!(read_pid(&path), Some(std::process::id()));
        assert_eq!(guard.path(), path.as_path());

        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn live_instance_with_same_name_blocks_second_instance() {
        let Some((parent, name)) = live_foreign_process() else {
            return;
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, parent.to_string()).unwrap();

        match InstanceGuard::acquire_as(&path, Some(name.as_os_str())) {
            Err(TextTyperError::AlreadyRunning { pid }) => assert_eq!(pid, parent),
            other => panic!("expected AlreadyRunning, got {:?}", other),
        }
        // The other instance's file is left alone
        assert_eq!(read_pid(&path), Some(parent));
    }

    #[test]
    fn reused_pid_of_unrelated_process_is_taken_over() {
        let Some((parent, _)) = live_foreign_process() else {
            return;
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, parent.to_string()).unwrap();

        let own_name = OsStr::new("text-typer-not-the-parent");
        let _guard = InstanceGuard::acquire_as(&path, Some(own_name)).unwrap();
        assert_eq!(read_pid(&path), Some(std::process::id()));
    }

    #[test]
    fn live_process_blocks_when_own_name_is_unknown() {
        let Some((parent, _)) = live_foreign_process() else {
            return;
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, parent.to_string()).unwrap();

        assert!(matches!(
            InstanceGuard::acquire_as(&path, None),
            Err(TextTyperError::AlreadyRunning { .. })
        ));
    }

    #[test]
    fn stale_pid_file_is_taken_over() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        // Far above any default pid_max
        fs::write(&path, "4000000000").unwrap();

        let _guard = InstanceGuard::acquire(&path).unwrap();
        assert_eq!(read_pid(&path), Some(std::process::id()));
    }

    #[test]
    fn garbage_pid_file_is_taken_over() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, "not a pid").unwrap();

        let _guard = InstanceGuard::acquire(&path).unwrap();
        assert_eq!(read_pid(&path), Some(std::process::id()));
    }

    #[test]
    fn own_pid_file_is_reacquired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, std::process::id().to_string()).unwrap();
        assert!(InstanceGuard::acquire(&path).is_ok());
    }

    #[test]
    fn drop_leaves_foreign_pid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.pid");
        let guard = InstanceGuard::acquire(&path).unwrap();
        fs::write(&path, "12345").unwrap();
        drop(guard);
        assert!(path.exists());
    }
}
