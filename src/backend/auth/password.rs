//! bcrypt password hashing

use bcrypt::BcryptError;

/// Hash a plaintext password at the given bcrypt cost
pub fn hash_password(plain: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(plain, cost)
}

/// Constant-time comparison against a stored hash
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hash)
}
