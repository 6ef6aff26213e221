//! HS256 JWT bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::ports::BearerTokens;

/// Lifetime of an issued bearer token. There is no refresh.
pub const BEARER_TOKEN_TTL_DAYS: i64 = 30;

/// Claims carried by a bearer token. `id` is the only identity claim.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: Uuid,
    iat: i64,
    exp: i64,
}

/// Signs and checks tokens with a server-held symmetric secret.
pub struct JwtBearerTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtBearerTokens {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl BearerTokens for JwtBearerTokens {
    fn issue(&self, user_id: Uuid) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(BEARER_TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("failed to sign bearer token: {e}")))
    }

    fn verify(&self, token: &str) -> Result<Uuid, DomainError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.id)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                DomainError::InvalidBearer
            })
    }
}
