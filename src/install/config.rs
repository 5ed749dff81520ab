use std::path::PathBuf;

use crate::paths;

/// Where and for which host the init.d script is installed
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Directory the script is written into
    pub init_dir: PathBuf,
    /// OS identifier of the host (compared against `linux`)
    pub os: String,
    /// Executable to install; `None` means the running executable
    pub executable: Option<PathBuf>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            init_dir: PathBuf::from(paths::INIT_D_DIR),
            os: std::env::consts::OS.into(),
            executable: None,
        }
    }
}
