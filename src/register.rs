//! Opt-in "install myself as a service" handling for host programs
//!
//! A host calls [`register_from_args`] early in `main`. Without `-install`
//! it returns and the program carries on; with it the process installs
//! itself and exits.

use std::env;

use crate::error::InstallError;
use crate::install::Installer;
use crate::ops::PrivilegedOps;

/// Flag that triggers the install
pub const INSTALL_FLAG: &str = "install";

/// Flag naming the account the service runs as
pub const RUN_AS_USER_FLAG: &str = "installRunAsUser";

/// Install-related command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFlags {
    /// Install this program as a service
    pub install: bool,
    /// Which user the service should run as
    pub run_as_user: String,
}

impl RegisterFlags {
    /// Pick the install flags out of `args`, ignoring everything else
    ///
    /// `args` should not include the program name. Flags may be written with
    /// one or two dashes, and values given inline (`-flag=value`) or as the
    /// next argument.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let Some(body) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
                continue;
            };
            let (key, inline) = match body.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (body, None),
            };

            match key {
                INSTALL_FLAG => {
                    flags.install = match inline {
                        Some(v) => parse_bool(v),
                        None => true,
                    };
                }
                RUN_AS_USER_FLAG => {
                    flags.run_as_user = match inline {
                        Some(v) => v.to_string(),
                        None => args
                            .next()
                            .map(|v| v.as_ref().to_string())
                            .unwrap_or_default(),
                    };
                }
                _ => {}
            }
        }

        flags
    }

    /// Flags from the process command line
    pub fn from_env() -> Self {
        Self::parse(env::args().skip(1))
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "true" | "TRUE" | "True")
}

/// What the process should do after looking at the flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub message: String,
}

/// Decide the outcome for `flags`, running the install when requested
///
/// Returns `None` when the install flag is not set.
pub fn evaluate<O: PrivilegedOps>(flags: &RegisterFlags, installer: &Installer<O>) -> Option<Outcome> {
    if !flags.install {
        return None;
    }

    if flags.run_as_user.is_empty() {
        return Some(Outcome {
            code: 1,
            message: InstallError::MissingUser.to_string(),
        });
    }

    let outcome = match installer.install(&flags.run_as_user) {
        Ok(()) => Outcome {
            code: 0,
            message: "successfully installed as service".into(),
        },
        Err(e) => Outcome {
            code: 1,
            message: format!("installing as service failed: <{}>", e),
        },
    };

    Some(outcome)
}

/// Handle install flags; exits the process if the install flag is set
pub fn register<O: PrivilegedOps>(flags: &RegisterFlags, installer: &Installer<O>) {
    if let Some(outcome) = evaluate(flags, installer) {
        println!("{}", outcome.message);
        std::process::exit(outcome.code);
    }
}

/// Parse the process command line and handle install flags
pub fn register_from_args() {
    register(&RegisterFlags::from_env(), &Installer::default());
}
