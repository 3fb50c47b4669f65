//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed database IDs shared by every tracking domain
//! - Lenient request-body deserializers used by the mobile client DTOs
//! - Client timestamp parsing
//! - Axum extractors that reject with the shared error shape
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod serde_ext;
pub mod time;
