use std::path::PathBuf;

/// All domain errors for adtrail.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum AdtrailError {
    #[error(
        "Audit API returned {status}: {message}\n\n  \
         Solutions:\n    \
         → 401/403: your session expired or lacks permission. Log in again or pass --token\n    \
         → 404: check --api-url (it should end in /api)\n    \
         → 5xx: the backend failed; try again later"
    )]
    Transport { status: u16, message: String },

    #[error(
        "Could not reach the audit API at {url}: {reason}\n\n  \
         Check that the backend is running and that --api-url is correct."
    )]
    Network { url: String, reason: String },

    #[error("Unexpected response from the audit API: {detail}")]
    InvalidResponse { detail: String },

    #[error("Stored session at {path} is malformed: {detail}")]
    SessionParse { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Invalid date: '{input}'\n\n  \
         Expected YYYY-MM-DD (e.g. 2026-01-15) or YYYY-MM-DDTHH:MM:SS."
    )]
    InvalidDate { input: String },

    #[error(
        "Unknown change category: '{input}'\n\n  \
         Valid categories: creation, edit, metrics, status, archived"
    )]
    UnknownCategory { input: String },

    #[error("Export failed: {reason}")]
    ExportFailed { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AdtrailError>;
