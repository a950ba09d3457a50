use actix_web::{http::StatusCode, web, HttpResponse};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use validator::Validate;

use crate::dto::CompanyRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::routes::respond;
use crate::state::AppState;

/// Company of the authenticated account
pub async fn show_company<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let profile = state.company_service.get_company(user.principal()).await?;
    Ok(respond(StatusCode::OK, profile))
}

/// Create the company and link it to the authenticated account
pub async fn save_company<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    user: AuthenticatedUser,
    body: web::Json<CompanyRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    req.validate()?;

    let profile = state
        .company_service
        .save_company(user.principal(), req.into())
        .await?;
    tracing::info!(
        email = %ed_shared::mask_email(user.email()),
        event = "company_saved",
        "Company linked to account"
    );

    Ok(respond(StatusCode::CREATED, profile))
}

pub async fn update_company<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    user: AuthenticatedUser,
    body: web::Json<CompanyRequest>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let req = body.into_inner();
    req.validate()?;

    let profile = state
        .company_service
        .update_company(user.principal(), req.into())
        .await?;
    Ok(respond(StatusCode::OK, profile))
}
