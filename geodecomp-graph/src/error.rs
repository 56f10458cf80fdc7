//! Error types for graph construction and partitioning.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartitionBackendError {
    #[error("partitioning backend failed: {0}")]
    Failed(String),

    #[error("backend returned {got} labels for {expected} vertices")]
    LabelCountMismatch { expected: usize, got: usize },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("rank {rank} failed to exchange partials: {reason}")]
    ExchangeFailed { rank: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum PartitionError {
    #[error(transparent)]
    Backend(#[from] PartitionBackendError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, PartitionError>;
