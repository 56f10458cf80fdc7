//! Error types for the dataflow engine (spec.md §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataflowError {
    #[error("hood indexed with non-neighbor id {0}")]
    UnknownNeighbor(u64),

    #[error("receiver endpoint {0:?} already registered")]
    NameInUse(String),

    #[error("receiver endpoint {0:?} not found")]
    NameNotFound(String),

    #[error("duplicate put at endpoint {endpoint:?}, global_nano_step {global_nano_step}")]
    DuplicateMessage { endpoint: String, global_nano_step: u64 },

    #[error("transport failure delivering to {endpoint:?}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("pending get at endpoint {0:?} was cancelled before its message arrived")]
    Cancelled(String),
}

pub type Result<T> = std::result::Result<T, DataflowError>;
