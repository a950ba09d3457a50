//! Unit tests for the company onboarding service

use std::sync::Arc;

use crate::domain::entities::{CompanyCategory, CompanyDetails, Principal, Role};
use crate::errors::{AuthError, DomainError};
use crate::repositories::InMemoryStore;
use crate::services::account::tests::mocks::{
    account_service, FlakyAccountRepository, RecordingNotifier,
};
use crate::services::account::RegisterRequest;
use crate::services::company::CompanyService;

fn details(name: &str, category: CompanyCategory) -> CompanyDetails {
    CompanyDetails {
        name: name.to_string(),
        description: "Car and motorbike rental".to_string(),
        category,
    }
}

fn ann() -> Principal {
    Principal {
        email: "a@x.com".to_string(),
        role: Role::Admin,
    }
}

async fn registered_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    account_service(&store, Arc::new(RecordingNotifier::new()))
        .register(RegisterRequest::with_password("a@x.com", "pw1234", "Ann", "Lee"))
        .await
        .unwrap();
    store
}

fn company_service(store: &InMemoryStore) -> CompanyService<InMemoryStore, InMemoryStore, InMemoryStore> {
    let store = Arc::new(store.clone());
    CompanyService::new(store.clone(), store.clone(), store)
}

#[tokio::test]
async fn test_save_company_links_account() {
    let store = registered_store().await;
    let service = company_service(&store);

    let profile = service
        .save_company(&ann(), details("Rent Co", CompanyCategory::Small))
        .await
        .unwrap();
    assert_eq!(profile.company_name, "Rent Co");
    assert_eq!(profile.category, CompanyCategory::Small);

    let account = store.account("a@x.com").await.unwrap();
    assert_eq!(account.registration_step, 1);
    let company_id = account.company_id.expect("company linked");
    assert_eq!(store.company(company_id).await.unwrap().name, "Rent Co");
}

#[tokio::test]
async fn test_save_company_unknown_account_rolls_back() {
    let store = InMemoryStore::new();
    let service = company_service(&store);

    let result = service
        .save_company(&ann(), details("Rent Co", CompanyCategory::Micro))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
    assert_eq!(store.company_count().await, 0);
}

#[tokio::test]
async fn test_failed_account_update_discards_company() {
    let store = registered_store().await;
    let mut accounts = FlakyAccountRepository::new(store.clone());
    accounts.fail_update = true;
    let shared = Arc::new(store.clone());
    let service = CompanyService::new(shared.clone(), Arc::new(accounts), shared);

    let result = service
        .save_company(&ann(), details("Rent Co", CompanyCategory::Middle))
        .await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));

    assert_eq!(store.company_count().await, 0);
    let account = store.account("a@x.com").await.unwrap();
    assert!(account.company_id.is_none());
    assert_eq!(account.registration_step, 0);
}

#[tokio::test]
async fn test_update_and_get_company() {
    let store = registered_store().await;
    let service = company_service(&store);

    service
        .save_company(&ann(), details("Rent Co", CompanyCategory::Small))
        .await
        .unwrap();
    let updated = service
        .update_company(&ann(), details("Rent Co Group", CompanyCategory::Enterprise))
        .await
        .unwrap();
    assert_eq!(updated.company_name, "Rent Co Group");

    let fetched = service.get_company(&ann()).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(store.company_count().await, 1);
}

#[tokio::test]
async fn test_company_missing_before_save() {
    let store = registered_store().await;
    let service = company_service(&store);

    let result = service.get_company(&ann()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CompanyNotFound))
    ));

    let result = service
        .update_company(&ann(), details("Rent Co", CompanyCategory::Small))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CompanyNotFound))
    ));
}
