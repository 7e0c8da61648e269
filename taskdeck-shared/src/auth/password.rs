/// Password hashing using Argon2id
///
/// This module is the credential codec: a one-way, salted hash on the way in
/// and a constant-time verification on the way out. Plaintext passwords never
/// leave this module's callers in any other form.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: tunable cost factor, default 3
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes from the OS RNG per hash
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password", DEFAULT_HASH_COST)?;
///
/// assert!(verify_password("super_secret_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Default iteration count (time cost) for hashing
pub const DEFAULT_HASH_COST: u32 = 3;

/// Error type for password hashing operations
///
/// Hashing can only fail on internal parameter or entropy problems; these are
/// unexpected and treated as fatal by callers. Verification never fails — a
/// malformed stored hash simply does not match.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("failed to hash password: {0}")]
    HashError(String),
}

/// Hashes a password using Argon2id
///
/// The `cost` parameter is the iteration count (time cost); memory and
/// parallelism are fixed. Higher cost makes brute-forcing proportionally more
/// expensive.
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
/// * `cost` - Iteration count; use [`DEFAULT_HASH_COST`] unless configured
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash),
/// e.g. `$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$hash...`
///
/// # Errors
///
/// Returns `PasswordError::HashError` if parameter construction or hashing
/// fails. This does not happen for ordinary input.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(cost)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Performs a constant-time comparison. Any mismatch — including a malformed
/// or truncated stored hash — is reported as `false`, never as an error, so
/// callers treat all failures uniformly as "not matching".
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct_password", DEFAULT_HASH_COST)?;
///
/// assert!(verify_password("correct_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// assert!(!verify_password("correct_password", "not a phc string"));
/// # Ok(())
/// # }
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    // Parameters are embedded in the hash itself
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_produces_phc_string() {
        let hash = hash_password("test_password_123", DEFAULT_HASH_COST).expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_respects_cost() {
        let hash = hash_password("test_password_123", 2).expect("hash");
        assert!(hash.contains("t=2"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password", DEFAULT_HASH_COST).expect("hash 1");
        let hash2 = hash_password("same_password", DEFAULT_HASH_COST).expect("hash 2");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password", DEFAULT_HASH_COST).expect("hash");
        assert!(verify_password("correct_password", &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password", DEFAULT_HASH_COST).expect("hash");
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password", DEFAULT_HASH_COST).expect("hash");
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_password_malformed_hash_is_not_matching() {
        assert!(!verify_password("password", "invalid_hash"));
        assert!(!verify_password("password", "$argon2id$invalid"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "very_long_password_that_is_longer_than_usual_passwords_123456789",
        ];

        for password in passwords {
            let hash = hash_password(password, DEFAULT_HASH_COST).expect("hash");
            assert!(
                verify_password(password, &hash),
                "password '{}' should verify",
                password
            );
        }
    }
}
