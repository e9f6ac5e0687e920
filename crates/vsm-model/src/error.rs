use thiserror::Error;

use vsm_pins::PinError;
use vsm_script::{Hook, ScriptError};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("licence server refused model key {key:#010x} (API version {api_version})")]
    Unauthorized { key: u32, api_version: u32 },

    #[error("model is already set up")]
    AlreadyActive,

    #[error("model has not been set up")]
    NotActive,

    #[error("model setup failed; notifications are rejected")]
    SetupFailed,

    #[error("model has been torn down")]
    TornDown,

    #[error("instance has no {0:?} property naming its script")]
    NoScriptName(String),

    #[error("pin table error: {0}")]
    Pins(#[from] PinError),

    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    #[error("{hook} failed: {source}")]
    Hook {
        hook:   Hook,
        #[source]
        source: ScriptError,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
