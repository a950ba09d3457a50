//! Shared helpers for the HTTP tests: an app over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::{self, MessageBody},
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web,
};
use ed_api::bootstrap::{build_services, Services};
use ed_core::domain::entities::Role;
use ed_core::repositories::InMemoryStore;
use ed_core::services::{RegisterRequest, TokenIssuer};
use ed_infra::mail::LogNotifier;
use ed_shared::AppConfig;
use serde_json::{json, Value};

pub type MemoryServices = Services<InMemoryStore, InMemoryStore, InMemoryStore>;

pub struct TestContext {
    pub store: InMemoryStore,
    pub services: MemoryServices,
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.password.cost = 4;

        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        let services = build_services(
            &config,
            Arc::clone(&shared),
            Arc::clone(&shared),
            shared,
            Arc::new(LogNotifier::new()),
        );

        Self { store, services }
    }

    pub fn state(&self) -> web::Data<ed_api::AppState<InMemoryStore, InMemoryStore, InMemoryStore>> {
        web::Data::new(self.services.state.clone())
    }

    pub fn tokens(&self) -> web::Data<TokenIssuer> {
        web::Data::from(Arc::clone(&self.services.tokens))
    }

    pub fn bearer(&self, email: &str) -> String {
        let token = self
            .services
            .tokens
            .issue(email, Role::Admin)
            .expect("token should sign");
        format!("Bearer {}", token)
    }

    /// Register a password account directly through the service
    pub async fn register(&self, email: &str) {
        self.services
            .state
            .account_service
            .register(RegisterRequest::with_password(email, "s3cret-pass", "Ann", "Lee"))
            .await
            .expect("registration should succeed");
    }

    pub async fn current_otp(&self, email: &str) -> String {
        self.store
            .account(email)
            .await
            .and_then(|account| account.otp)
            .map(|otp| otp.code)
            .expect("account should have an OTP")
    }
}

/// Build the application under test
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(ed_api::create_app($ctx.state(), $ctx.tokens(), 256 * 1024))
            .await
    };
}

/// Call the app and return status and JSON body, also for requests the
/// middleware rejects before a handler runs
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            let bytes = test::read_body(resp).await;
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let bytes = body::to_bytes(resp.into_body()).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
    }
}

pub fn registration(email: &str) -> Value {
    json!({
        "first_name": "Ann",
        "last_name": "Lee",
        "email": email,
        "password": "s3cret-pass",
        "password_confirmation": "s3cret-pass"
    })
}

pub fn company(name: &str, category: &str) -> Value {
    json!({
        "company_name": name,
        "company_description": "Car rental",
        "category": category
    })
}
