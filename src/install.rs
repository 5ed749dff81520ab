mod config;

pub use config::InstallConfig;

use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::init;
use crate::ops::{PrivilegedOps, SystemOps};
use crate::paths;

/// Installs the running executable as an init.d service
pub struct Installer<O: PrivilegedOps = SystemOps> {
    config: InstallConfig,
    ops: O,
}

impl Installer<SystemOps> {
    pub fn new(config: InstallConfig) -> Self {
        Self::with_ops(config, SystemOps)
    }
}

impl Default for Installer<SystemOps> {
    fn default() -> Self {
        Self::new(InstallConfig::default())
    }
}

impl<O: PrivilegedOps> Installer<O> {
    pub fn with_ops(config: InstallConfig, ops: O) -> Self {
        Self { config, ops }
    }

    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Path of the init.d script called `name`
    pub fn initd_path(&self, name: &str) -> PathBuf {
        self.config.init_dir.join(name)
    }

    pub fn script_exists(&self, name: &str) -> bool {
        self.ops.exists(&self.initd_path(name))
    }

    /// Split the executable path into its directory (with trailing `/`) and base name
    ///
    /// # Panics
    ///
    /// Panics when the running executable's path cannot be resolved. The
    /// process has nothing sensible to install in that case.
    pub fn locate_executable(&self) -> (String, String) {
        let exe = match &self.config.executable {
            Some(path) => path.clone(),
            None => std::env::current_exe()
                .unwrap_or_else(|e| panic!("cannot resolve path of running executable: {}", e)),
        };
        split_executable(&exe)
            .unwrap_or_else(|| panic!("executable path {} has no file name", exe.display()))
    }

    /// Mark the script called `name` executable
    pub fn make_executable(&self, name: &str) -> Result<()> {
        let path = self.initd_path(name);
        self.ops
            .make_executable(&path)
            .map_err(|source| InstallError::MakeExecutableFailed { path, source })
    }

    /// Write `content` as the script called `name` and make it executable
    ///
    /// Nothing is removed if a later step fails.
    pub fn write_script(&self, name: &str, content: &str) -> Result<()> {
        let path = self.initd_path(name);
        tracing::debug!("Writing {}", path.display());

        let written = self
            .ops
            .write_file(&path, content.as_bytes())
            .map_err(|source| InstallError::Io {
                path: path.clone(),
                source,
            })?;

        if written != content.len() {
            return Err(InstallError::IncompleteWrite {
                written,
                expected: content.len(),
            });
        }

        self.make_executable(name)
    }

    /// Install the executable as an init.d service running as `user`
    pub fn install(&self, user: &str) -> Result<()> {
        let (dir, name) = self.locate_executable();

        if self.config.os != paths::SUPPORTED_OS {
            return Err(InstallError::UnsupportedPlatform(self.config.os.clone()));
        }

        if !nix::unistd::Uid::effective().is_root() {
            tracing::warn!(
                "Not running as root, writing to {} may fail",
                self.config.init_dir.display()
            );
        }

        if self.script_exists(&name) {
            return Err(InstallError::ScriptAlreadyExists {
                path: self.initd_path(&name),
                name,
            });
        }

        let script = init::initd_script(&dir, &name, user)?;
        self.write_script(&name, &script)?;

        tracing::info!(
            "Installed {} as init.d service running as {}",
            self.initd_path(&name).display(),
            user
        );

        Ok(())
    }
}

fn split_executable(exe: &Path) -> Option<(String, String)> {
    let name = exe.file_name()?.to_string_lossy().into_owned();
    let dir = match exe.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            let parent = parent.to_string_lossy();
            if parent.ends_with('/') {
                parent.into_owned()
            } else {
                format!("{}/", parent)
            }
        }
        _ => String::new(),
    };
    Some((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use std::os::unix::fs::PermissionsExt;

    #[derive(Default)]
    struct FakeOps {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
        chmod_calls: RefCell<Vec<PathBuf>>,
        short_write: Option<usize>,
        chmod_fails: bool,
    }

    impl PrivilegedOps for FakeOps {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<usize> {
            let len = self.short_write.unwrap_or(content.len()).min(content.len());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content[..len].to_vec());
            Ok(len)
        }

        fn make_executable(&self, path: &Path) -> anyhow::Result<()> {
            self.chmod_calls.borrow_mut().push(path.to_path_buf());
            if self.chmod_fails {
                anyhow::bail!("chmod failed with exit code Some(1)");
            }
            Ok(())
        }
    }

    fn config(os: &str) -> InstallConfig {
        InstallConfig {
            init_dir: PathBuf::from("/etc/init.d"),
            os: os.into(),
            executable: Some(PathBuf::from("/opt/app/myservice")),
        }
    }

    fn installed(installer: &Installer<FakeOps>) -> String {
        let files = installer.ops.files.borrow();
        String::from_utf8(files[Path::new("/etc/init.d/myservice")].clone()).unwrap()
    }

    #[test]
    fn split_keeps_trailing_slash() {
        let (dir, name) = split_executable(Path::new("/opt/app/myservice")).unwrap();
        assert_eq!(dir, "/opt/app/");
        assert_eq!(name, "myservice");
    }

    #[test]
    fn split_root_executable() {
        let (dir, name) = split_executable(Path::new("/myservice")).unwrap();
        assert_eq!(dir, "/");
        assert_eq!(name, "myservice");
    }

    #[test]
    fn split_without_file_name() {
        assert!(split_executable(Path::new("/")).is_none());
    }

    #[test]
    fn locate_running_executable() {
        let installer = Installer::new(InstallConfig::default());
        let (dir, name) = installer.locate_executable();
        assert!(dir.ends_with('/'));
        assert!(!name.is_empty());
    }

    #[test]
    fn install_writes_script_and_marks_executable() {
        let installer = Installer::with_ops(config("linux"), FakeOps::default());
        installer.install("appuser").unwrap();

        let script = installed(&installer);
        assert!(script.contains("# Provides: myservice"));
        assert!(script.contains("dir=\"/opt/app/\""));
        assert!(script.contains("user=\"appuser\""));
        assert!(script.contains("cmd=\"/opt/app/myservice\""));
        assert_eq!(
            *installer.ops.chmod_calls.borrow(),
            vec![PathBuf::from("/etc/init.d/myservice")]
        );
    }

    #[test]
    fn unsupported_platform_touches_nothing() {
        let installer = Installer::with_ops(config("windows"), FakeOps::default());
        let err = installer.install("appuser").unwrap_err();

        assert!(matches!(err, InstallError::UnsupportedPlatform(ref os) if os == "windows"));
        assert!(installer.ops.files.borrow().is_empty());
        assert!(installer.ops.chmod_calls.borrow().is_empty());
    }

    #[test]
    fn second_install_keeps_first_script() {
        let installer = Installer::with_ops(config("linux"), FakeOps::default());
        installer.install("first").unwrap();
        let err = installer.install("second").unwrap_err();

        assert!(matches!(err, InstallError::ScriptAlreadyExists { ref name, .. } if name == "myservice"));
        assert!(installed(&installer).contains("user=\"first\""));
        assert_eq!(installer.ops.chmod_calls.borrow().len(), 1);
    }

    #[test]
    fn short_write_skips_chmod() {
        let ops = FakeOps {
            short_write: Some(5),
            ..Default::default()
        };
        let installer = Installer::with_ops(config("linux"), ops);
        let err = installer.install("appuser").unwrap_err();

        assert!(matches!(
            err,
            InstallError::IncompleteWrite { written: 5, expected } if expected > 5
        ));
        assert!(installer.ops.chmod_calls.borrow().is_empty());
    }

    #[test]
    fn chmod_failure_leaves_script_in_place() {
        let ops = FakeOps {
            chmod_fails: true,
            ..Default::default()
        };
        let installer = Installer::with_ops(config("linux"), ops);
        let err = installer.install("appuser").unwrap_err();

        assert!(matches!(err, InstallError::MakeExecutableFailed { .. }));
        assert!(installer.script_exists("myservice"));
    }

    #[test]
    fn install_into_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        let installer = Installer::new(InstallConfig {
            init_dir: dir.path().to_path_buf(),
            os: "linux".into(),
            executable: Some(PathBuf::from("/usr/local/bin/daemon")),
        });

        installer.install("nobody").unwrap();

        let path = dir.path().join("daemon");
        let script = fs::read_to_string(&path).unwrap();
        assert!(script.contains("cmd=\"/usr/local/bin/daemon\""));
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        let err = installer.install("nobody").unwrap_err();
        assert!(matches!(err, InstallError::ScriptAlreadyExists { .. }));
    }

    #[test]
    fn missing_init_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let installer = Installer::new(InstallConfig {
            init_dir: dir.path().join("missing"),
            os: "linux".into(),
            executable: Some(PathBuf::from("/usr/local/bin/daemon")),
        });

        let err = installer.install("nobody").unwrap_err();
        assert!(matches!(err, InstallError::Io { .. }));
    }
}
