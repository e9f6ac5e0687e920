use thiserror::Error;

use vsm_core::PinId;

#[derive(Debug, Error)]
pub enum PinError {
    #[error("no pin declaration table found")]
    Missing,

    #[error("malformed pin table entry {entry}: {reason}")]
    Malformed { entry: usize, reason: String },

    #[error("pin table declares {got} pins but capacity is {capacity}")]
    CapacityExceeded { got: usize, capacity: usize },

    #[error("simulator has no pin named {0:?}")]
    Unresolved(String),

    #[error("{id} out of range: registry holds {count} pins")]
    OutOfRange { id: PinId, count: usize },

    #[error("pin table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PinResult<T> = Result<T, PinError>;
