use crate::fetch::error::FetchError;
use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// The normalization core itself only ever produces `MalformedRecord` — every
/// other missing-data case degrades to defaults or key omission instead of
/// erroring. Fetch-layer failures arrive pre-classified as `FetchError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Shortcode could not be derived from the given URL or identifier
    #[error("Could not extract shortcode: {0}")]
    NotExtractable(String),

    /// Classified upstream fetch failures (not found, auth required, transport)
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// A record is structurally missing a required attribute that no fallback resolves
    #[error("Malformed record: missing {0}")]
    MalformedRecord(&'static str),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
