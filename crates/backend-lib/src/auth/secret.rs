// ============================
// travelog-backend/src/auth/secret.rs
// ============================
//! Ephemeral JWT signing secret, used when the configuration leaves
//! `jwt_secret` empty. Tokens signed with it die with the process.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// 256 bits, matching the HS256 digest size
const SIGNING_SECRET_BYTES: usize = 32;

/// Fresh random signing secret, base64url without padding
pub fn ephemeral_signing_secret() -> String {
    random_secret(SIGNING_SECRET_BYTES)
}

fn random_secret(bytes: usize) -> String {
    let mut buffer = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
