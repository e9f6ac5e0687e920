use std::path::PathBuf;

use thiserror::Error;

use vsm_pins::PinError;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("no script named {0:?}")]
    NotFound(String),

    #[error("script {name:?} failed to load: {reason}")]
    Load { name: String, reason: String },

    #[error("device has no pin named {0:?}")]
    UnknownPin(String),

    #[error(transparent)]
    Pin(#[from] PinError),

    #[error("script error: {0}")]
    Runtime(String),

    #[error("host could not load memory image {}", .0.display())]
    Image(PathBuf),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
