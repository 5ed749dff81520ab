use std::io;
use std::path::PathBuf;

/// Errors returned by the install procedure
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("installing as a service is not supported on {0}")]
    UnsupportedPlatform(String),

    #[error("script {name} already exists in init.d folder ({})", .path.display())]
    ScriptAlreadyExists { name: String, path: PathBuf },

    #[error("failed to render init.d script: {0}")]
    TemplateRender(String),

    #[error("file could not be written completely ({written} of {expected} bytes)")]
    IncompleteWrite { written: usize, expected: usize },

    #[error("failed to make {} executable: {source:#}", .path.display())]
    MakeExecutableFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("you must specify a user that the service runs as")]
    MissingUser,

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InstallError>;
