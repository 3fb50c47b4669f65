//! AI Configuration

use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL; the request goes to `{api_url}/{model}:generateContent`
    pub api_url: String,
    pub request_timeout: Duration,
    /// Per-client limit on the AI endpoints
    pub rate_limit: RateLimitConfig,
    /// Trust `X-Forwarded-For` when keying the rate limit
    pub trust_proxy: bool,
    pub image_ttl: Duration,
    pub image_cache_capacity: usize,
    /// Upper bound on the total bytes held by the temporary image cache
    pub image_cache_max_bytes: usize,
    /// Request body limit on the AI endpoints (base64 photos are large)
    pub max_body_bytes: usize,
    pub default_target_calories: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            rate_limit: RateLimitConfig::new(10, 60),
            trust_proxy: false,
            image_ttl: Duration::from_secs(60 * 60),
            image_cache_capacity: 256,
            image_cache_max_bytes: 256 * 1024 * 1024,
            max_body_bytes: 50 * 1024 * 1024,
            default_target_calories: 2000,
        }
    }
}

impl AiConfig {
    /// Relaxed rate limit for local work
    pub fn development() -> Self {
        Self {
            rate_limit: RateLimitConfig::new(100, 60),
            ..Default::default()
        }
    }

    /// `{api_url}/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = AiConfig {
            api_url: "http://localhost:9000/models/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.image_cache_capacity, 256);
        assert_eq!(config.image_cache_max_bytes, 256 * 1024 * 1024);
        assert!(!config.trust_proxy);
        assert_eq!(config.image_ttl, Duration::from_secs(3600));
        assert_eq!(AiConfig::development().rate_limit.max_requests, 100);
    }
}
