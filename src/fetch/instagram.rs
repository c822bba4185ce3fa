//! InstagramClient — fetch backend using Instagram's internal GraphQL and REST APIs.
//!
//! Retrieves public posts/reels and profiles without login:
//! - posts via the GraphQL endpoint (`doc_id` query, rotates every few weeks,
//!   configurable through `INSTAGRAM_DOC_ID`)
//! - profiles via the `web_profile_info` REST endpoint (by username) or the
//!   user-info endpoint (by numeric id)
//!
//! Upstream failures are classified into `FetchError` kinds at this layer so
//! nothing downstream has to sniff message strings.

use crate::core::config;
use crate::core::error::AppResult;
use crate::fetch::error::FetchError;
use crate::fetch::record::{MediaRecord, ProfileRecord};
use crate::fetch::{ProfileTarget, RecordFetcher};
use async_trait::async_trait;
use serde_json::Value;

/// Instagram GraphQL API endpoint.
const GRAPHQL_ENDPOINT: &str = "https://www.instagram.com/api/graphql";

/// Instagram internal app ID (public, embedded in the web app).
const IG_APP_ID: &str = "936619743392459";

/// Facebook LSD token (anti-CSRF, public static value used by web scrapers).
const FB_LSD_TOKEN: &str = "AVqbxe3J_YA";

/// Facebook ASBD ID (public, embedded in the web app).
const FB_ASBD_ID: &str = "129477";

/// Fetch client for Instagram's internal APIs.
pub struct InstagramClient {
    client: reqwest::Client,
}

impl Default for InstagramClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InstagramClient {
    pub fn new() -> Self {
        let mut client_builder = reqwest::Client::builder()
            .user_agent(config::UPSTREAM_USER_AGENT.as_str())
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(15));

        // Use WARP proxy if available (datacenter IP protection)
        if let Some(ref proxy_url) = *config::proxy::WARP_PROXY {
            let trimmed = proxy_url.trim();
            if !trimmed.is_empty() && trimmed != "none" && trimmed != "disabled" {
                match reqwest::Proxy::all(trimmed) {
                    Ok(proxy) => {
                        log::info!("InstagramClient: using proxy for upstream requests");
                        client_builder = client_builder.proxy(proxy);
                    }
                    Err(e) => {
                        log::warn!("InstagramClient: failed to configure proxy: {}", e);
                    }
                }
            }
        }

        let client = client_builder
            .build()
            .expect("InstagramClient HTTP client build should succeed");

        Self { client }
    }

    /// POST the GraphQL shortcode-media query and return the parsed body.
    async fn graphql_query(&self, shortcode: &str) -> Result<Value, FetchError> {
        let doc_id = config::INSTAGRAM_DOC_ID.as_str();
        let variables = format!(r#"{{"shortcode":"{}"}}"#, shortcode);
        let body = format!(
            "doc_id={}&variables={}&lsd={}",
            doc_id,
            urlencoding::encode(&variables),
            FB_LSD_TOKEN
        );

        log::info!("InstagramClient: GraphQL POST for shortcode {}", shortcode);

        let response = self
            .client
            .post(GRAPHQL_ENDPOINT)
            .header("X-IG-App-ID", IG_APP_ID)
            .header("X-FB-LSD", FB_LSD_TOKEN)
            .header("X-ASBD-ID", FB_ASBD_ID)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Referer", "https://www.instagram.com/")
            .header("Origin", "https://www.instagram.com")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Upstream(format!("GraphQL HTTP {}", status)));
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "InstagramClient: GraphQL returned non-JSON ({}): {}",
                e,
                &text[..text.len().min(500)]
            );
            FetchError::Upstream(format!("Failed to parse GraphQL response: {}", e))
        })
    }

    /// GET an internal REST endpoint with app headers and return the parsed body.
    async fn rest_get(&self, endpoint: &str) -> Result<Value, FetchError> {
        log::info!("InstagramClient: GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .header("X-IG-App-ID", IG_APP_ID)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() == 404 {
            return Err(FetchError::NotFound("Profile not found".to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Upstream(format!("REST HTTP {}", status)));
        }

        serde_json::from_str(&text)
            .map_err(|e| FetchError::Upstream(format!("Failed to parse profile response: {}", e)))
    }

    /// Classify an error payload by its `message` field.
    fn classify_message(body: &Value) -> Option<FetchError> {
        let message = body.get("message").and_then(|v| v.as_str())?;
        if message.contains("login_required") || message.contains("checkpoint_required") {
            return Some(FetchError::AuthRequired("Private account or login required".to_string()));
        }
        if message.contains("useragent mismatch") || message.contains("doc_id") {
            log::error!("InstagramClient: possible doc_id expiry: {}", message);
            return Some(FetchError::Upstream(format!("doc_id may be expired: {}", message)));
        }
        Some(FetchError::Upstream(message.to_string()))
    }
}

#[async_trait]
impl RecordFetcher for InstagramClient {
    fn name(&self) -> &str {
        "instagram"
    }

    async fn fetch_post(&self, shortcode: &str) -> AppResult<MediaRecord> {
        let body = self.graphql_query(shortcode).await?;

        let media = body
            .pointer("/data/xdt_shortcode_media")
            .or_else(|| body.pointer("/data/shortcode_media"))
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| {
                Self::classify_message(&body)
                    .unwrap_or_else(|| FetchError::NotFound("Post not found or media unavailable".to_string()))
            })?;

        MediaRecord::from_node(media)
    }

    async fn fetch_profile(&self, target: &ProfileTarget) -> AppResult<ProfileRecord> {
        let body = match target {
            ProfileTarget::Username(username) => {
                let endpoint = format!(
                    "https://i.instagram.com/api/v1/users/web_profile_info/?username={}",
                    urlencoding::encode(username)
                );
                self.rest_get(&endpoint).await?
            }
            ProfileTarget::UserId(user_id) => {
                let endpoint = format!("https://i.instagram.com/api/v1/users/{}/info/", user_id);
                self.rest_get(&endpoint).await?
            }
        };

        let user = body
            .pointer("/data/user")
            .or_else(|| body.get("user"))
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| {
                Self::classify_message(&body)
                    .unwrap_or_else(|| FetchError::NotFound("Profile not found".to_string()))
            })?;

        ProfileRecord::from_node(user)
    }
}
