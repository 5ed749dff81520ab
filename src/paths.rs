/// Directory holding SysV init scripts
pub const INIT_D_DIR: &str = "/etc/init.d";

/// Where generated scripts keep the service PID file
pub const PID_DIR: &str = "/var/run";

/// Where generated scripts send service stdout/stderr
pub const LOG_DIR: &str = "/var/log";

/// The only OS identifier the installer accepts
pub const SUPPORTED_OS: &str = "linux";
