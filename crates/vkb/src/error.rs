use std::path::PathBuf;

use thiserror::Error;
use vkb_core::VkbError;
use vkb_runtime::ScriptError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("layout file {path}: {source}")]
    Layout {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Core(#[from] VkbError),

    #[error("action script, line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("{message}")]
    Exit { code: i32, message: String },
}

impl CliError {
    /// Process exit status for this error. Never zero.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit { code, .. } if *code != 0 => *code,
            Self::Core(VkbError::InvalidLayout { .. }) | Self::Layout { .. } => 2,
            Self::Script { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn exit(code: i32, message: impl Into<String>) -> Self {
        Self::Exit {
            code,
            message: message.into(),
        }
    }
}

impl From<ScriptError> for CliError {
    fn from(error: ScriptError) -> Self {
        Self::Script {
            line: error.line,
            message: error.message,
        }
    }
}
