//! Application factory
//!
//! Builds the actix-web `App` for a given set of services. Both the binary and
//! the HTTP tests go through [`create_app`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, Error, HttpRequest, HttpResponse,
};
use ed_core::repositories::{AccountRepository, CompanyRepository, TransactionManager};
use ed_core::services::TokenIssuer;
use ed_shared::{DefaultResponse, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::{status_text, ApiError};
use crate::middleware::JwtAuth;
use crate::routes::{company, user};
use crate::state::AppState;

/// Create and configure the application with all dependencies
///
/// `json_limit` caps the size of JSON request bodies in bytes.
pub fn create_app<M, A, C>(
    state: web::Data<AppState<M, A, C>>,
    tokens: web::Data<TokenIssuer>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    App::new()
        .app_data(state)
        .app_data(tokens)
        .app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(json_error),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(welcome))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/user")
                        .route(
                            "/register/basic/without-sso",
                            web::post().to(user::register_without_sso::<M, A, C>),
                        )
                        .route(
                            "/register/basic/with-sso",
                            web::post().to(user::register_with_sso::<M, A, C>),
                        )
                        .service(
                            web::resource("/check-email")
                                .wrap(JwtAuth::new())
                                .route(web::get().to(user::check_email::<M, A, C>)),
                        )
                        .service(
                            web::resource("/verification-otp")
                                .wrap(JwtAuth::new())
                                .route(web::post().to(user::verification_otp::<M, A, C>)),
                        )
                        .service(
                            web::resource("/generate-otp")
                                .wrap(JwtAuth::new())
                                .route(web::post().to(user::generate_otp::<M, A, C>)),
                        ),
                )
                .service(
                    web::scope("/company")
                        .wrap(JwtAuth::new())
                        .route("/show", web::get().to(company::show_company::<M, A, C>))
                        .route("/save", web::post().to(company::save_company::<M, A, C>))
                        .route("/update", web::post().to(company::update_company::<M, A, C>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(DefaultResponse::new(
        200,
        "OK",
        serde_json::json!({
            "message": "Welcome to the EDash API",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    ))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "edash-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    let status = StatusCode::NOT_FOUND;
    HttpResponse::NotFound().json(ErrorResponse::new(
        status.as_u16(),
        status_text(status),
        format!("No route for {} {}", req.method(), req.path()),
    ))
}

fn json_error(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> Error {
    ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
}

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> Error {
    ApiError::BadRequest(format!("Invalid query string: {}", err)).into()
}
