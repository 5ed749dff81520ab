//! Host operations that need elevated rights
//!
//! The installer never touches the filesystem or spawns processes directly;
//! it goes through [`PrivilegedOps`] so the whole install sequence can run
//! against a fake in tests.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::cmd;

/// Operations the installer performs on the host
pub trait PrivilegedOps {
    /// Whether something already exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create (or truncate) `path` and write `content`, returning the byte count written
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<usize>;

    /// Set the executable bit on `path`
    fn make_executable(&self, path: &Path) -> Result<()>;
}

/// Real host implementation backed by `std::fs` and `chmod`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOps;

impl PrivilegedOps for SystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<usize> {
        let mut file = File::create(path)?;
        let written = file.write(content)?;
        file.flush()?;
        Ok(written)
    }

    fn make_executable(&self, path: &Path) -> Result<()> {
        let chmod = which::which("chmod").context("chmod not found in PATH")?;
        cmd::run(chmod, [OsStr::new("+x"), path.as_os_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn write_file_reports_full_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svc");
        let written = SystemOps.write_file(&path, b"#!/bin/sh\n").unwrap();
        assert_eq!(written, 10);
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\n");
    }

    #[test]
    fn exists_tracks_file_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svc");
        assert!(!SystemOps.exists(&path));
        fs::write(&path, "x").unwrap();
        assert!(SystemOps.exists(&path));
    }

    #[test]
    fn make_executable_sets_exec_bits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svc");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        SystemOps.make_executable(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn make_executable_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SystemOps.make_executable(&dir.path().join("nope")).is_err());
    }
}
