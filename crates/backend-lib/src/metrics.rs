// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SIGNUP_CREATED: &str = "auth.signup.created";
pub const SIGNUP_REJECTED: &str = "auth.signup.rejected";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const TOKEN_REJECTED: &str = "auth.token.rejected";
pub const STORY_CREATED: &str = "story.created";
pub const STORY_LISTED: &str = "story.listed";
