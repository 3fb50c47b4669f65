//! Application Configuration
//!
//! Reads the environment (after `.env` is loaded) into the per-crate
//! configs.

use ai::AiConfig;
use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::parse_duration;
use kernel::id::UserId;
use platform::rate_limit::RateLimitConfig;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Allowed browser origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin, no credentials
    Any,
    /// Listed origins, credentials allowed
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: Environment,
    pub database_url: String,
    pub database_max_connections: u32,
    pub cors_origins: CorsOrigins,
    pub auth: AuthConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = Environment::parse(
            get("APP_ENV").or_else(|| get("NODE_ENV")).as_deref(),
        );
        let production = environment == Environment::Production;

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let mut auth = if production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };
        match (get("JWT_SECRET"), get("JWT_REFRESH_SECRET")) {
            (Some(access), Some(refresh)) => {
                if access == refresh {
                    bail!("JWT_SECRET and JWT_REFRESH_SECRET must differ");
                }
                auth.access_secret = access;
                auth.refresh_secret = refresh;
            }
            (None, None) if !production => {
                tracing::warn!("JWT secrets not set, using development defaults");
            }
            _ => bail!("JWT_SECRET and JWT_REFRESH_SECRET must both be set"),
        }
        if let Some(ttl) = get("JWT_ACCESS_EXPIRES_IN") {
            auth.access_ttl =
                parse_duration(&ttl).with_context(|| format!("invalid JWT_ACCESS_EXPIRES_IN: {ttl}"))?;
        }
        if let Some(ttl) = get("JWT_REFRESH_EXPIRES_IN") {
            auth.refresh_ttl = parse_duration(&ttl)
                .with_context(|| format!("invalid JWT_REFRESH_EXPIRES_IN: {ttl}"))?;
        }
        if let Some(id) = get("DEFAULT_USER_ID") {
            auth.default_user_id = UserId::from_str(&id)
                .with_context(|| format!("invalid DEFAULT_USER_ID: {id}"))?;
        }
        auth.allow_guest_mode = get("ALLOW_GUEST_MODE").is_none_or(|v| v.trim() != "false");
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        let mut ai = if production {
            AiConfig::default()
        } else {
            AiConfig::development()
        };
        ai.api_key = get("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
        if let Some(model) = get("GEMINI_MODEL") {
            ai.model = model;
        }
        if let Some(url) = get("GEMINI_API_URL") {
            ai.api_url = url;
        }
        let max_requests = parse_or("AI_RATE_LIMIT_MAX", get("AI_RATE_LIMIT_MAX"), ai.rate_limit.max_requests)?;
        let window_secs = parse_or(
            "AI_RATE_LIMIT_WINDOW_SECS",
            get("AI_RATE_LIMIT_WINDOW_SECS"),
            ai.rate_limit.window.as_secs(),
        )?;
        ai.rate_limit = RateLimitConfig::new(max_requests, window_secs);
        ai.trust_proxy = get("TRUST_PROXY").is_some_and(|v| matches!(v.trim(), "true" | "1"));
        ai.image_cache_max_bytes = parse_or(
            "IMAGE_CACHE_MAX_BYTES",
            get("IMAGE_CACHE_MAX_BYTES"),
            ai.image_cache_max_bytes,
        )?;

        let cors_origins = match get("CORS_ORIGINS") {
            Some(v) if v.trim() == "*" => CorsOrigins::Any,
            Some(v) => CorsOrigins::List(
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            ),
            None if production => bail!("CORS_ORIGINS must be set in production"),
            None => CorsOrigins::Any,
        };

        Ok(Self {
            port: parse_or("PORT", get("PORT"), 3001)?,
            environment,
            database_url,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                5,
            )?,
            cors_origins,
            auth,
            ai,
        })
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
{
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {key}: {v}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/healthy"),
        ("GEMINI_API_KEY", "test-key"),
    ];

    #[test]
    fn test_development_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert!(config.auth.allow_guest_mode);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.default_user_id, UserId::from_raw(1));
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(!config.ai.trust_proxy);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "8080"),
            ("ALLOW_GUEST_MODE", "false"),
            ("DEFAULT_USER_ID", "7"),
            ("JWT_ACCESS_EXPIRES_IN", "15m"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("AI_RATE_LIMIT_MAX", "3"),
            ("AI_RATE_LIMIT_WINDOW_SECS", "10"),
            ("TRUST_PROXY", "true"),
            ("IMAGE_CACHE_MAX_BYTES", "1048576"),
        ]);
        let config = load(&pairs).unwrap();

        assert_eq!(config.port, 8080);
        assert!(!config.auth.allow_guest_mode);
        assert_eq!(config.auth.default_user_id, UserId::from_raw(7));
        assert_eq!(config.auth.access_ttl, Duration::from_secs(900));
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec!["http://a.test".into(), "http://b.test".into()])
        );
        assert_eq!(config.ai.rate_limit.max_requests, 3);
        assert_eq!(config.ai.rate_limit.window, Duration::from_secs(10));
        assert!(config.ai.trust_proxy);
        assert_eq!(config.ai.image_cache_max_bytes, 1_048_576);
    }

    #[test]
    fn test_required_values() {
        assert!(load(&[("DATABASE_URL", "postgres://x")]).is_err());
        assert!(load(&[("GEMINI_API_KEY", "k")]).is_err());

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(load(&pairs).is_err());
    }

    #[test]
    fn test_production_requires_secrets() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([("APP_ENV", "production"), ("CORS_ORIGINS", "https://app.test")]);
        assert!(load(&pairs).is_err());

        pairs.extend([("JWT_SECRET", "a"), ("JWT_REFRESH_SECRET", "a")]);
        assert!(load(&pairs).is_err());

        pairs.retain(|(k, _)| *k != "JWT_REFRESH_SECRET");
        pairs.push(("JWT_REFRESH_SECRET", "b"));
        let config = load(&pairs).unwrap();
        assert!(config.auth.cookie_secure);
        assert_eq!(config.ai.rate_limit.max_requests, 10);
    }
}
