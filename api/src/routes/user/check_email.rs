use actix_web::{http::StatusCode, web, HttpResponse};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use validator::Validate;

use crate::dto::CheckEmailQuery;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::routes::respond;
use crate::state::AppState;

/// Look up the profile registered under `?email=`
pub async fn check_email<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    _user: AuthenticatedUser,
    query: web::Query<CheckEmailQuery>,
) -> Result<HttpResponse, ApiError>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    query.validate()?;
    let summary = state.account_service.lookup_by_email(&query.email).await?;
    Ok(respond(StatusCode::OK, summary))
}
