use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::pagination::parse_leading_int;

pub mod policy;

pub use policy::{authorize, rule_for, AccessContext, AccessRule, Action};

/// Verified caller identity: the token subject, i.e. a user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn subject(&self) -> &str {
        &self.0
    }

    pub fn as_id(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    /// Numeric comparison when both sides are integers, text otherwise.
    pub fn matches_text(&self, other: &str) -> bool {
        match (self.as_id(), other.trim().parse::<i64>()) {
            (Some(a), Ok(b)) => a == b,
            _ => self.0 == other,
        }
    }

    pub fn matches_id(&self, id: i64) -> bool {
        self.as_id() == Some(id)
    }

    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.matches_text(s),
            Value::Number(n) => match n.as_i64() {
                Some(id) => self.matches_id(id),
                None => self.0 == n.to_string(),
            },
            _ => false,
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Signs and verifies HS256 identity tokens with the server's shared secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: i64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(&config.jwt_secret, config.jwt_expiry_hours)
    }

    pub fn generate(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.subject().to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature and expiry, returning the subject.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        Ok(Identity(data.claims.sub))
    }
}

/// Login ids arrive as numbers or numeric strings.
pub fn login_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}
