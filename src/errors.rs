//! Error type shared by the installers, the host capability and the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an ensurer (or the whole run).
///
/// Best-effort steps never produce one of these; they log a warning and
/// record it on the session instead. Only the pipeline decides whether an
/// error ends the run, based on [`ProvisionError::halts_pipeline`] and the
/// configured failure policy.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{0}` is not available on PATH after its install step")]
    ToolMissing(String),

    #[error(
        "Command Line Tools installation was started; re-run setup-workstation once the installer finishes"
    )]
    CltInstallPending,

    #[error("Homebrew is not available after bootstrapping (looked in {0})")]
    HomebrewUnavailable(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,
}

impl ProvisionError {
    /// Errors after which no later step can do anything useful.
    pub fn halts_pipeline(&self) -> bool {
        matches!(
            self,
            ProvisionError::CltInstallPending | ProvisionError::HomebrewUnavailable(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
