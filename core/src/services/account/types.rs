//! Request types for the account lifecycle service

use crate::domain::entities::FederatedIdentity;

/// Plaintext password
///
/// Only ever handed to the hasher; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(plaintext.into())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// How a new account proves its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Local password, stored as a bcrypt digest
    Password(Password),
    /// External identity provider; no local password is kept
    Federated(FederatedIdentity),
}

/// Registration input, already validated by the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub credentials: Credentials,
}

impl RegisterRequest {
    /// Registration with a local password
    pub fn with_password(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            credentials: Credentials::Password(Password::new(password)),
        }
    }

    /// Registration through an identity provider
    pub fn federated(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        identity: FederatedIdentity,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            credentials: Credentials::Federated(identity),
        }
    }
}
