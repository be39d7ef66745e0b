//! Bearer token issuance and validation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::models::User;

/// Issued tokens expire one hour after issuance.
const TOKEN_TTL_SECONDS: i64 = 3600;

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub username: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// HS256 token service over a shared symmetric key. Tokens are
/// self-contained; no server-side session state exists.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("unit-test-secret", "InvoiceManagementAPI", "InvoiceManagementAPI")
    }

    fn user() -> User {
        User::new("alice".to_string(), "hash".to_string()).unwrap()
    }

    #[test]
    fn issued_token_round_trips() {
        let svc = service();
        let user = user();

        let token = svc.issue_token(&user).unwrap();
        let claims = svc.decode_token(&token).unwrap();

        assert_eq!(claims.sub, user.id().to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "InvoiceManagementAPI");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let token = JwtService::new("another-secret", "InvoiceManagementAPI", "InvoiceManagementAPI")
            .issue_token(&user())
            .unwrap();

        assert!(service().decode_token(&token).is_err());
    }

    #[test]
    fn token_for_other_audience_is_rejected() {
        let token = JwtService::new("unit-test-secret", "InvoiceManagementAPI", "SomeOtherAPI")
            .issue_token(&user())
            .unwrap();

        assert!(service().decode_token(&token).is_err());
    }
}
