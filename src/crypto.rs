//! Password hashing and one-time-code generation

use rand::Rng;

/// Bcrypt cost factor for account passwords
pub const BCRYPT_COST: u32 = 15;

/// Hash a password with bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Generate a random 4-digit one-time code.
///
/// `thread_rng` is a CSPRNG, so a captured code reveals nothing about the
/// next one.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(1000..10000);
    code.to_string()
}
