use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("{0} is unsupported: extent is fixed by the node set and weight matrix at construction")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, GridError>;
