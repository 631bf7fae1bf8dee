// crates/backend-lib/src/middleware/mod.rs

//! Request guards for the travel journal API.

pub mod auth;

pub use auth::{authorize, bearer_token, AuthUser, BEARER_PREFIX};
