//! Shared error type and logging setup for the geodecomp workspace.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::init_tracing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_safe_to_call_more_than_once_per_process() {
        init_tracing("text");
        init_tracing("json");
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
