/// Session token issuance and verification
///
/// Session tokens are signed, time-bounded assertions of `(actor id, role)`.
/// They are stateless: nothing is stored server-side, validity is entirely
/// determined by the HS256 signature and the expiry window. The accepted
/// trade-off is that a token cannot be revoked before it expires; the 24-hour
/// TTL bounds the exposure.
///
/// The signing secret is process-wide immutable configuration: it is loaded
/// once at startup and passed into the [`TokenSigner`] constructor. An absent
/// secret is a fatal configuration error at construction time — there is no
/// unsigned fallback.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC-SHA256)
/// - **Expiration**: 24 hours from issuance
/// - **Validation**: signature, expiry, issued-at, and issuer checks
/// - **Failure reporting**: verification never distinguishes *why* a token
///   was rejected; a malformed, forged, or expired token all yield the same
///   [`TokenError::Invalid`], so callers cannot leak signing details
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::TokenSigner;
/// use taskdeck_shared::auth::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = TokenSigner::new("a-secret-of-at-least-32-bytes-long")?;
///
/// let token = signer.issue(42, Role::Member)?;
/// let actor = signer.verify(&token)?;
///
/// assert_eq!(actor.id, 42);
/// assert_eq!(actor.role, Role::Member);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Role};

/// Issuer claim embedded in every token
const ISSUER: &str = "taskdeck";

/// Token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The signing secret is absent; tokens can be neither issued nor
    /// verified
    #[error("signing secret is not set")]
    MissingSecret,

    /// Signing failed (internal, unexpected)
    #[error("failed to sign token")]
    Signing,

    /// The token is malformed, forged, expired, or not yet valid; the reason
    /// is deliberately not distinguished
    #[error("invalid token")]
    Invalid,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject - actor's user id
    sub: i64,

    /// Actor's role at issuance time
    role: Role,

    /// Issuer - always "taskdeck"
    iss: String,

    /// Issued at (Unix timestamp)
    iat: i64,

    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Issues and verifies session tokens with a fixed secret
///
/// Construct one at startup from configuration and share it behind an `Arc`;
/// the secret is read-only afterward, so concurrent use needs no
/// synchronization.
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    /// Creates a signer from the process-wide secret
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingSecret`] if the secret is empty. Callers
    /// must treat this as a fatal configuration error; there is no mode in
    /// which tokens go unsigned.
    pub fn new(secret: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self { secret })
    }

    /// Issues a token asserting `(actor_id, role)` for the next 24 hours
    pub fn issue(&self, actor_id: i64, role: Role) -> Result<String, TokenError> {
        self.issue_with_ttl(actor_id, role, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Issues a token with an explicit lifetime
    ///
    /// Exists so tests can mint already-expired tokens; production callers
    /// use [`TokenSigner::issue`].
    pub fn issue_with_ttl(
        &self,
        actor_id: i64,
        role: Role,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: actor_id,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, &claims, &key).map_err(|_| TokenError::Signing)
    }

    /// Verifies a token and extracts the actor it asserts
    ///
    /// Checks the signature, the issuer, and that the current time lies
    /// within `[issued-at, expires-at]`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for every rejection — structural
    /// malformation, signature mismatch, wrong issuer, expiry, or a token
    /// issued in the future. The reason is never surfaced.
    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| TokenError::Invalid)?;

        // jsonwebtoken checks exp; the lower bound of the validity window is
        // checked here, with the same leeway it applies to exp
        let claims = token_data.claims;
        if claims.iat > Utc::now().timestamp() + validation.leeway as i64 {
            return Err(TokenError::Invalid);
        }

        Ok(Actor::new(claims.sub, claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_empty_secret_is_fatal() {
        let result = TokenSigner::new("");
        assert!(matches!(result, Err(TokenError::MissingSecret)));
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = TokenSigner::new(SECRET).expect("signer");

        let token = signer.issue(42, Role::Member).expect("issue");
        let actor = signer.verify(&token).expect("verify");

        assert_eq!(actor.id, 42);
        assert_eq!(actor.role, Role::Member);
    }

    #[test]
    fn test_admin_role_survives_roundtrip() {
        let signer = TokenSigner::new(SECRET).expect("signer");

        let token = signer.issue(1, Role::Admin).expect("issue");
        let actor = signer.verify(&token).expect("verify");

        assert!(actor.is_admin());
    }

    #[test]
    fn test_verify_with_rotated_secret_fails() {
        let old = TokenSigner::new(SECRET).expect("signer");
        let new = TokenSigner::new("another-secret-also-32-bytes-long!!").expect("signer");

        let token = old.issue(42, Role::Member).expect("issue");

        let result = new.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let signer = TokenSigner::new(SECRET).expect("signer");

        // Expired an hour ago, well past any leeway
        let token = signer
            .issue_with_ttl(42, Role::Member, Duration::hours(-1))
            .expect("issue");

        let result = signer.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let signer = TokenSigner::new(SECRET).expect("signer");

        for garbage in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            let result = signer.verify(garbage);
            assert!(
                matches!(result, Err(TokenError::Invalid)),
                "'{}' should be invalid",
                garbage
            );
        }
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let signer = TokenSigner::new(SECRET).expect("signer");
        let token = signer.issue(42, Role::Member).expect("issue");

        // Flip a character in the payload segment
        let mut tampered = token.into_bytes();
        let mid = tampered.len() / 2;
        tampered[mid] = if tampered[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).expect("utf8");

        let result = signer.verify(&tampered);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }
}
