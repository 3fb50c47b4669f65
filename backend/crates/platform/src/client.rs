//! Client identification utilities

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Extract client IP address
///
/// `X-Forwarded-For` is only honoured when `trust_proxy` is set, i.e. the
/// API runs behind a reverse proxy that overwrites the header. Otherwise
/// the direct connection IP is used.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    if !trust_proxy {
        return direct_ip;
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

/// Rate limit key for a client; `"unknown"` when no address is available
pub fn client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>, trust_proxy: bool) -> String {
    extract_client_ip(headers, direct_ip, trust_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
