use ed_core::domain::entities::FederatedIdentity;
use ed_core::services::RegisterRequest;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Password registration body
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterWithoutSsoRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub password_confirmation: String,
}

impl From<RegisterWithoutSsoRequest> for RegisterRequest {
    fn from(req: RegisterWithoutSsoRequest) -> Self {
        RegisterRequest::with_password(
            req.email,
            req.password,
            req.first_name,
            req.last_name,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterWithSsoRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub provider: String,
    #[validate(length(min = 1, max = 255))]
    pub provider_id: String,
}

impl From<RegisterWithSsoRequest> for RegisterRequest {
    fn from(req: RegisterWithSsoRequest) -> Self {
        RegisterRequest::federated(
            req.email,
            req.first_name,
            req.last_name,
            FederatedIdentity::new(req.provider, req.provider_id),
        )
    }
}

/// OTP submission; the code length is checked against the configured length
/// by the handler
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerificationOtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "ascii_digits"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckEmailQuery {
    #[validate(email)]
    pub email: String,
}

fn ascii_digits(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits"))
    }
}
