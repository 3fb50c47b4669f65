//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use kernel::id::UserId;
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub access_secret: String,
    /// HMAC secret for refresh tokens (must differ from the access secret)
    pub refresh_secret: String,
    /// Access token lifetime (30 minutes)
    pub access_ttl: Duration,
    /// Refresh token lifetime (7 days), also the cookie Max-Age
    pub refresh_ttl: Duration,
    /// Refresh cookie name
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Resolve anonymous callers of protected routes to `default_user_id`
    pub allow_guest_mode: bool,
    /// Guest identity
    pub default_user_id: UserId,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: "dev-access-secret".to_string(),
            refresh_secret: "dev-refresh-secret".to_string(),
            access_ttl: Duration::from_secs(30 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            allow_guest_mode: true,
            default_user_id: UserId::from_raw(1),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie settings for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.refresh_ttl.as_secs()),
        }
    }
}

/// Parse a lifetime such as `30m`, `7d`, `12h`, `45s` or bare seconds
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    let amount: u64 = digits.parse().ok()?;

    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return None,
    };

    amount.checked_mul(multiplier).map(Duration::from_secs)
}
