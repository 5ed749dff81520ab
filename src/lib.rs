//! Install a program as a SysV init.d service
//!
//! Call [`register::register_from_args`] at the top of `main` to give a
//! program `-install` / `-installRunAsUser` flags, or drive
//! [`install::Installer`] directly.

pub mod cmd;
pub mod error;
pub mod init;
pub mod install;
pub mod ops;
pub mod paths;
pub mod register;

pub use error::{InstallError, Result};
pub use install::{InstallConfig, Installer};
pub use register::RegisterFlags;
