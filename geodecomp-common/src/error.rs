//! Narrow error type for the handful of fallible operations that live
//! directly in `geodecomp-common` (currently just I/O helpers shared by
//! downstream crates). Each sub-crate defines its own richer error enum;
//! see the facade crate's `Error` for the umbrella type that wraps them
//! all at the library boundary.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_displays_message() {
        let err = Error::InvalidInput("bad width".to_string());
        assert_eq!(err.to_string(), "invalid input: bad width");
    }
}
