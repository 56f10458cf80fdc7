//! Error type for `geodecomp-region`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    /// A strict constructor (e.g. deserializing a wire payload) was handed
    /// a streak with `end_x <= origin.x()`. The mutating `insert`/`remove`
    /// API silently discards zero-length streaks instead of erroring; this
    /// variant is only raised by the strict paths that parse untrusted
    /// input and want to surface the mistake.
    #[error("invalid streak: origin.x = {origin_x}, end_x = {end_x} (end_x must be > origin.x)")]
    InvalidStreak { origin_x: i64, end_x: i64 },
}

pub type Result<T> = std::result::Result<T, RegionError>;
