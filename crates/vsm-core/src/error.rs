//! Base error type.
//!
//! Decoding logic states never fails; the only fallible operations in this
//! crate are the property text parsers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VsmError {
    #[error("parse error: {0}")]
    Parse(String),
}

pub type VsmResult<T> = Result<T, VsmError>;
