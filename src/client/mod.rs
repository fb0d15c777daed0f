//! HTTP client for the remote actions API.
//!
//! One [`ApiClient`] serves all three endpoints: the unauthenticated version
//! probe, the authenticated trigger call and the authenticated event stream.

pub mod events;
pub mod trigger;
pub mod version;

/// Header carrying the caller's API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Shared client for the actions service.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: String,
    api_key: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.origin)
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `origin`, authenticating with `api_key`.
    #[must_use]
    pub fn new(origin: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_origin_is_tolerated() {
        let client = ApiClient::new("https://app.example.test/", "k");
        assert_eq!(client.url("/version"), "https://app.example.test/version");
    }

    #[test]
    fn debug_omits_the_api_key() {
        let client = ApiClient::new("https://app.example.test", "super-secret");
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
