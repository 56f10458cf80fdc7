//! Structured logging setup shared by every crate in the workspace.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` for the process.
///
/// `log_format`: `"json"` for structured JSON lines, anything else for
/// human-readable text. Respects `RUST_LOG` (default: `info`).
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // `try_init` rather than `init`: the workspace has no single CLI entry
    // point, so tests and embedding applications may call this more than
    // once per process. A second call is a no-op instead of a panic.
    match log_format {
        "json" => {
            let _ = fmt().json().with_env_filter(filter).with_target(true).try_init();
        }
        _ => {
            let _ = fmt().with_env_filter(filter).with_target(false).try_init();
        }
    }
}
