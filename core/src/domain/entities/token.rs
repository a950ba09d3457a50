//! Session token claims and the principal they identify.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::account::Role;
use crate::errors::TokenError;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, the application name
    pub iss: String,

    /// Subject (account email)
    pub sub: String,

    /// Audience (account role)
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp, always later than `iat`
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `email` with `role`, valid for `validity` from `issued_at`
    pub fn new(
        issuer: &str,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        let expiry = issued_at + validity;
        Self {
            iss: issuer.to_string(),
            sub: email.to_string(),
            aud: role.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims are expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Authenticated caller, produced once by token verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

impl TryFrom<Claims> for Principal {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.sub.is_empty() {
            return Err(TokenError::InvalidClaims);
        }
        let role = claims
            .aud
            .parse::<Role>()
            .map_err(|_| TokenError::InvalidClaims)?;
        Ok(Self {
            email: claims.sub,
            role,
        })
    }
}
