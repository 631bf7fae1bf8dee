// ============================
// travelog-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod secret;
pub mod token;
mod service;
mod service_impl;

pub use password::{
    hash_password, hash_password_secure, password_violations, verify_password,
    verify_password_blocking, PasswordRequirements, PASSWORD_SYMBOLS,
};
pub use secret::ephemeral_signing_secret;
pub use service::{AuthService, AuthSession};
pub use service_impl::DefaultAuth;
pub use token::{Claims, TokenError, TokenService, DEFAULT_TOKEN_TTL};
