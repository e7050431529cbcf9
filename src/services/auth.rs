use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from credential hashing and token handling
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("hashing error: {0}")]
    Hashing(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error("invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("missing authorization token")]
    MissingToken,
}

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and verifies bearer tokens and password hashes
///
/// Wraps the external credential primitives (argon2 salted hashing,
/// HS256 signed tokens) behind one small service.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(secret: String, ttl_secs: u64) -> Self {
        Self { secret, ttl_secs }
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Verify a password against a stored hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Issue a signed token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.ttl_secs as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret".to_string(), 3600)
    }

    #[test]
    fn test_hash_and_verify_password() {
        let issuer = issuer();
        let hash = issuer.hash_password("hunter22").unwrap();

        assert_ne!(hash, "hunter22");
        assert!(issuer.verify_password("hunter22", &hash).is_ok());
        assert!(issuer.verify_password("wrong", &hash).is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let issuer = issuer();
        let a = issuer.hash_password("hunter22").unwrap();
        let b = issuer.hash_password("hunter22").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_round_trip() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = issuer().issue(Uuid::new_v4()).unwrap();
        let other = TokenIssuer::new("other-secret".to_string(), 3600);
        assert!(other.verify(&token).is_err());
    }
}
