//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Cookie management for the refresh-token cookie
//! - Random bytes and Base64 helpers
//! - Fixed-window rate limiting
//! - Client IP resolution behind proxies

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
