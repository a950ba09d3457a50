//! Bearer token authentication for the secured routes.
//!
//! The middleware verifies the token with the [`TokenIssuer`] registered as
//! app data and stores the resulting [`Principal`] in the request extensions.
//! Handlers receive it through the [`AuthenticatedUser`] extractor and never
//! read tokens themselves.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use ed_core::domain::entities::Principal;
use ed_core::errors::DomainError;
use ed_core::services::TokenIssuer;
use futures_util::future::LocalBoxFuture;

use crate::handlers::ApiError;

const BEARER: &str = "Bearer";

/// Authenticated caller of a secured route
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

impl AuthenticatedUser {
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(
            principal
                .map(AuthenticatedUser)
                .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()).into()),
        )
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let principal = authenticate(&req)?;
            req.extensions_mut().insert(principal);
            service.call(req).await
        })
    }
}

/// Resolve the caller of `req`
///
/// * no or empty `Authorization` header: 401
/// * a scheme other than `Bearer`: 400
/// * a token that fails verification: 401
fn authenticate(req: &ServiceRequest) -> Result<Principal, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    let token = parse_bearer(header)?;

    let issuer = req.app_data::<web::Data<TokenIssuer>>().ok_or_else(|| DomainError::Internal {
        message: "token issuer is not registered".to_string(),
    })?;

    Ok(issuer.authenticate(token)?)
}

fn parse_bearer(header: &str) -> Result<&str, ApiError> {
    if header.is_empty() {
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }

    let mut parts = header.splitn(2, ' ');
    if parts.next() != Some(BEARER) {
        return Err(ApiError::BadRequest(
            "Authorization header must use the Bearer scheme".to_string(),
        ));
    }
    Ok(parts.next().unwrap_or_default().trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as actix_test, web, App, HttpResponse, ResponseError};
    use ed_core::domain::entities::Role;
    use ed_core::services::TokenIssuerConfig;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenIssuerConfig {
            secret: "middleware-secret".to_string(),
            issuer: "EDash".to_string(),
            validity: chrono::Duration::hours(1),
        })
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.email().to_string())
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc").unwrap(), "abc");
        assert_eq!(parse_bearer("Bearer").unwrap(), "");

        let missing = parse_bearer("").unwrap_err();
        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

        let basic = parse_bearer("Basic dXNlcjpwYXNz").unwrap_err();
        assert_eq!(basic.status_code(), StatusCode::BAD_REQUEST);

        let lowercase = parse_bearer("bearer abc").unwrap_err();
        assert_eq!(lowercase.status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let tokens = issuer();
        let token = tokens.issue("ann@example.com", Role::Admin).unwrap();

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(tokens))
                .service(web::resource("/me").wrap(JwtAuth::new()).route(web::get().to(whoami))),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        assert_eq!(body, "ann@example.com");
    }

    #[actix_web::test]
    async fn test_rejections() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(issuer()))
                .service(web::resource("/me").wrap(JwtAuth::new()).route(web::get().to(whoami))),
        )
        .await;

        let cases = [
            (None, StatusCode::UNAUTHORIZED),
            (Some("Token abc"), StatusCode::BAD_REQUEST),
            (Some("Bearer not-a-jwt"), StatusCode::UNAUTHORIZED),
        ];

        for (header, expected) in cases {
            let mut req = actix_test::TestRequest::get().uri("/me");
            if let Some(value) = header {
                req = req.insert_header((AUTHORIZATION, value));
            }
            let resp = actix_test::try_call_service(&app, req.to_request()).await;
            let status = match resp {
                Ok(resp) => resp.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            assert_eq!(status, expected, "header {:?}", header);
        }
    }
}
