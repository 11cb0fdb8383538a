//! Credential hashing and bearer-token primitives.
//!
//! Everything here is pure over its inputs (apart from per-call salt
//! generation); the signing secret, token lifetime and bcrypt work factor
//! are fixed at construction from [`AppConfig`].

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use userhub_config::AppConfig;
use userhub_models::users::Claims;

pub struct SecurityService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
}

impl SecurityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: chrono::Duration::minutes(config.token_ttl_minutes),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Salted one-way hash of a plaintext password.
    pub fn hash_password(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.bcrypt_cost)
    }

    /// `Ok(false)` on mismatch; an error only for a malformed stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, hash)
    }

    /// Signed bearer token asserting `subject` as its payload, expiring
    /// `token_ttl` after issuance.
    pub fn issue_token(
        &self,
        subject: Uuid,
    ) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok((token, expires_at))
    }

    /// Signature and expiry check against the shared secret. Callers treat
    /// every error kind as the same rejection.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
