// ============================
// travelog-backend/src/auth/password.rs
// ============================
//! Password hashing and verification.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::AppError;

/// Symbols accepted by the symbol rule
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&#^_-";

/// Password complexity requirements
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 50,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_symbol: true,
        }
    }
}

/// Hash a password using argon2id with a random salt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

/// List every rule the password breaks, empty when it is acceptable
pub fn password_violations(password: &str, requirements: &PasswordRequirements) -> Vec<String> {
    let mut violations = Vec::new();

    let len = password.chars().count();
    if len < requirements.min_length || len > requirements.max_length {
        violations.push(format!(
            "Password must be between {} and {} characters",
            requirements.min_length, requirements.max_length
        ));
    }

    if requirements.require_uppercase && !password.chars().any(char::is_uppercase) {
        violations.push("Password must contain at least one uppercase letter".to_string());
    }

    if requirements.require_lowercase && !password.chars().any(char::is_lowercase) {
        violations.push("Password must contain at least one lowercase letter".to_string());
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one digit".to_string());
    }

    if requirements.require_symbol && !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push(format!(
            "Password must contain at least one of {PASSWORD_SYMBOLS}"
        ));
    }

    violations
}

/// Hash off the async runtime and zeroize the plaintext
pub async fn hash_password_secure(mut plain: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || {
        let hash = hash_password(&plain);
        plain.zeroize();
        hash
    })
    .await?;
    hash.map_err(|e| AppError::Internal(e.to_string()))
}

/// Verify off the async runtime and zeroize the plaintext
pub async fn verify_password_blocking(hash: String, mut plain: String) -> Result<bool, AppError> {
    let ok = tokio::task::spawn_blocking(move || {
        let ok = verify_password(&hash, &plain);
        plain.zeroize();
        ok
    })
    .await?;
    Ok(ok)
}
