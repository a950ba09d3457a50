use actix_web::{http::StatusCode, web, HttpResponse};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{GenerateOtpRequest, VerificationOtpRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::routes::respond_empty;
use crate::state::AppState;

/// Check a submitted OTP code
///
/// The code must be exactly the configured number of ASCII digits before the
/// service is consulted.
pub async fn verification_otp<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    _user: AuthenticatedUser,
    body: web::Json<VerificationOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    check_otp_request(&req, state.account_service.config().otp_length)?;

    state.account_service.verify_otp(&req.email, &req.otp).await?;
    Ok(respond_empty(StatusCode::OK))
}

/// Replace the OTP code and email the new one
pub async fn generate_otp<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    _user: AuthenticatedUser,
    body: web::Json<GenerateOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    req.validate()?;

    state.account_service.reissue_otp(&req.email).await?;
    Ok(respond_empty(StatusCode::OK))
}

fn check_otp_request(req: &VerificationOtpRequest, otp_length: usize) -> Result<(), ValidationErrors> {
    let mut errors = req.validate().err().unwrap_or_else(ValidationErrors::new);
    if req.otp.len() != otp_length {
        let mut error = ValidationError::new("length");
        error.add_param("equal".into(), &otp_length);
        errors.add("otp", error);
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
