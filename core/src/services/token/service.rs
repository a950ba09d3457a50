//! Session token issuance and verification

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::{Claims, Principal, Role};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenIssuerConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and verifies session tokens
pub struct TokenIssuer {
    config: TokenIssuerConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates a new token issuer
    pub fn new(config: TokenIssuerConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&Role::ALL.map(|role| role.as_str()));
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a token for `email` with `role`, valid from now
    pub fn issue(&self, email: &str, role: Role) -> DomainResult<String> {
        self.issue_at(email, role, Utc::now())
    }

    /// Issues a token as if signed at `issued_at`
    pub fn issue_at(&self, email: &str, role: Role, issued_at: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims::new(
            &self.config.issuer,
            email,
            role,
            issued_at,
            self.config.validity,
        );
        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            DomainError::Signing {
                message: e.to_string(),
            }
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience and expiry are valid
    /// * `Err(DomainError::Token)` - Anything else
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    JwtErrorKind::InvalidIssuer
                    | JwtErrorKind::InvalidAudience
                    | JwtErrorKind::InvalidSubject
                    | JwtErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(error)
            })
    }

    /// Verifies a token and yields the principal it identifies
    pub fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        let claims = self.verify(token)?;
        Principal::try_from(claims).map_err(DomainError::from)
    }
}
