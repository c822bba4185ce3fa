//! Upstream fetch abstraction layer.
//!
//! Provides the `RecordFetcher` trait so the web layer and the one-shot CLI
//! take an injected, explicitly-configured client instead of reaching for a
//! module-level singleton. Tests substitute a mock; production wires in
//! `InstagramClient`.

pub mod error;
pub mod instagram;
pub mod record;

use crate::core::error::AppResult;
use async_trait::async_trait;

pub use error::FetchError;
pub use instagram::InstagramClient;
pub use record::{MediaRecord, ProfileRecord};

/// Which account a profile fetch targets.
///
/// The API accepts both `username` and numeric `userid` query parameters;
/// they resolve through different upstream endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    Username(String),
    UserId(u64),
}

impl std::fmt::Display for ProfileTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileTarget::Username(name) => write!(f, "@{}", name),
            ProfileTarget::UserId(id) => write!(f, "id:{}", id),
        }
    }
}

/// Trait for upstream record fetchers.
///
/// One fetch call produces one read-only record; the normalization core never
/// performs network I/O itself. Implementations classify their failures into
/// `FetchError` kinds so the web layer can map them to status codes.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Human-readable name of this fetcher (e.g., "instagram")
    fn name(&self) -> &str;

    /// Fetch a single post/reel record by shortcode.
    async fn fetch_post(&self, shortcode: &str) -> AppResult<MediaRecord>;

    /// Fetch an account record by username or numeric user id.
    async fn fetch_profile(&self, target: &ProfileTarget) -> AppResult<ProfileRecord>;
}
