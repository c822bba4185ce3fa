use once_cell::sync::Lazy;
use std::env;

/// Configuration constants for the service
/// Port the public HTTP API listens on
/// Read from WEB_PORT environment variable
/// Default: 8080
pub static WEB_PORT: Lazy<u16> = Lazy::new(|| {
    env::var("WEB_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Instagram GraphQL `doc_id` for the shortcode media query
/// Read from INSTAGRAM_DOC_ID environment variable
/// Instagram rotates this value every few weeks; the default is the one
/// embedded in the current web app
pub static INSTAGRAM_DOC_ID: Lazy<String> =
    Lazy::new(|| env::var("INSTAGRAM_DOC_ID").unwrap_or_else(|_| "8845758582119845".to_string()));

/// Browser User-Agent sent on all upstream requests
/// Read from UPSTREAM_USER_AGENT environment variable
pub static UPSTREAM_USER_AGENT: Lazy<String> = Lazy::new(|| {
    env::var("UPSTREAM_USER_AGENT").unwrap_or_else(|_| {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
            .to_string()
    })
});

/// Maximum number of recent posts included in a profile-mode response
/// Read from PROFILE_POSTS_CAP environment variable
/// Observed deployments use caps between 6 and 12
/// Default: 8
pub static PROFILE_POSTS_CAP: Lazy<usize> = Lazy::new(|| {
    env::var("PROFILE_POSTS_CAP")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8)
});

/// Upload-date offset mode for normalized posts: "utc" or "ist"
/// Read from POST_DATE_OFFSET environment variable
/// Default: utc
pub static POST_DATE_OFFSET: Lazy<String> = Lazy::new(|| {
    env::var("POST_DATE_OFFSET")
        .unwrap_or_else(|_| "utc".to_string())
        .to_lowercase()
});

/// View-count policy for normalized posts: "omit" or "zero"
/// "omit" drops the views key when no count is resolved; "zero" always
/// emits the key, defaulting to 0
/// Read from VIEWS_POLICY environment variable
/// Default: omit
pub static VIEWS_POLICY: Lazy<String> = Lazy::new(|| {
    env::var("VIEWS_POLICY")
        .unwrap_or_else(|_| "omit".to_string())
        .to_lowercase()
});

/// Field-label casing for media-mode envelopes: "title" or "snake"
/// Read from LABEL_STYLE environment variable
/// Default: title
pub static LABEL_STYLE: Lazy<String> = Lazy::new(|| {
    env::var("LABEL_STYLE")
        .unwrap_or_else(|_| "title".to_string())
        .to_lowercase()
});

/// Proxy configuration for upstream requests
pub mod proxy {
    use once_cell::sync::Lazy;
    use std::env;

    /// Egress proxy URL for Instagram requests (datacenter IP protection)
    /// Read from WARP_PROXY environment variable
    /// Example: socks5://your-vps-ip:1080
    pub static WARP_PROXY: Lazy<Option<String>> = Lazy::new(|| {
        env::var("WARP_PROXY")
            .ok()
            .and_then(|s| if s.trim().is_empty() { None } else { Some(s) })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Statics read the environment once; in the test environment none of
        // these variables are set, so the documented defaults apply.
        assert_eq!(*WEB_PORT, 8080);
        assert_eq!(*PROFILE_POSTS_CAP, 8);
        assert_eq!(POST_DATE_OFFSET.as_str(), "utc");
        assert_eq!(VIEWS_POLICY.as_str(), "omit");
        assert_eq!(LABEL_STYLE.as_str(), "title");
    }
}
