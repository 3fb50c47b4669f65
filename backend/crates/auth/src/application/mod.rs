//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod identity;
pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod token;

pub use identity::{Identity, ResolveIdentityUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use profile::ProfileUseCase;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenKind, TokenPair, TokenService};

use crate::domain::entity::user::User;

/// Successful register/login/refresh result
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user: User,
    pub tokens: TokenPair,
}
