use actix_web::{http::StatusCode, web, HttpResponse};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use validator::Validate;

use crate::dto::{RegisterWithSsoRequest, RegisterWithoutSsoRequest};
use crate::handlers::ApiError;
use crate::routes::respond;
use crate::state::AppState;

/// Register an account with a local password
///
/// Responds 201 with the profile and session token. An OTP email is sent to
/// the address; delivery problems do not fail the request.
pub async fn register_without_sso<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    body: web::Json<RegisterWithoutSsoRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    req.validate()?;

    let result = state.account_service.register(req.into()).await?;
    tracing::info!(
        email = %ed_shared::mask_email(&result.email),
        event = "account_registered",
        "Account registered with password"
    );

    Ok(respond(StatusCode::CREATED, result))
}

/// Register an account authenticated by an identity provider
pub async fn register_with_sso<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    body: web::Json<RegisterWithSsoRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    req.validate()?;
    let provider = req.provider.clone();

    let result = state.account_service.register(req.into()).await?;
    tracing::info!(
        email = %ed_shared::mask_email(&result.email),
        provider = %provider,
        event = "account_registered",
        "Account registered with identity provider"
    );

    Ok(respond(StatusCode::CREATED, result))
}
