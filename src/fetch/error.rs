use std::fmt;

/// Structured error type for upstream fetch operations.
///
/// Categorized variants instead of a single message string so callers can
/// map failures to user-facing status codes without string sniffing.
#[derive(Debug)]
pub enum FetchError {
    /// Post or profile does not exist, or media is unavailable
    NotFound(String),
    /// Private account, checkpoint, or login-required response
    AuthRequired(String),
    /// Any other upstream failure (transport error, non-JSON body, expired doc_id)
    Upstream(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound(msg) => write!(f, "{}", msg),
            FetchError::AuthRequired(msg) => write!(f, "{}", msg),
            FetchError::Upstream(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Returns subcategory for logging
    pub fn subcategory(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "not_found",
            FetchError::AuthRequired(_) => "auth_required",
            FetchError::Upstream(_) => "upstream",
        }
    }

    /// Returns the inner message
    pub fn message(&self) -> &str {
        match self {
            FetchError::NotFound(msg) | FetchError::AuthRequired(msg) | FetchError::Upstream(msg) => msg,
        }
    }
}

/// Uncategorized strings become `FetchError::Upstream`
impl From<String> for FetchError {
    fn from(s: String) -> Self {
        FetchError::Upstream(s)
    }
}

impl From<&str> for FetchError {
    fn from(s: &str) -> Self {
        FetchError::Upstream(s.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound("Post not found".into());
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn test_fetch_error_subcategory() {
        assert_eq!(FetchError::NotFound("".into()).subcategory(), "not_found");
        assert_eq!(FetchError::AuthRequired("".into()).subcategory(), "auth_required");
        assert_eq!(FetchError::Upstream("".into()).subcategory(), "upstream");
    }

    #[test]
    fn test_from_string() {
        let err: FetchError = "socket closed".to_string().into();
        assert!(matches!(err, FetchError::Upstream(_)));
        assert_eq!(err.message(), "socket closed");
    }
}
