//! Password hashing and verification secrets.

use rand::RngCore;

use crate::domain::error::DomainError;

/// bcrypt work factor for stored passwords.
pub const PASSWORD_HASH_COST: u32 = 10;

/// Raw entropy of a verification secret, in bytes.
pub const VERIFICATION_SECRET_BYTES: usize = 32;

/// Hash a password on the blocking pool. Every call draws a fresh salt.
pub async fn hash_password(plain: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, PASSWORD_HASH_COST))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(plain: String, hash: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("password check task failed: {e}")))?
        .map_err(|e| DomainError::internal(format!("stored password hash is unreadable: {e}")))
}

/// 256 random bits, hex encoded (64 characters).
pub fn new_verification_secret() -> String {
    let mut buf = [0u8; VERIFICATION_SECRET_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
