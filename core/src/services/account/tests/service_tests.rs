//! Unit tests for the account lifecycle service

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::domain::entities::{FederatedIdentity, Role};
use crate::errors::{AuthError, DomainError};
use crate::repositories::InMemoryStore;
use crate::services::account::{AccountService, AccountServiceConfig, RegisterRequest};
use crate::services::notification::Notifier;
use crate::services::security::PasswordHasher;

use super::mocks::{
    account_service, test_config, token_issuer, FailingNotifier, FlakyAccountRepository,
    ManualClock, RecordingNotifier, SlowNotifier,
};

fn ann() -> RegisterRequest {
    RegisterRequest::with_password("a@x.com", "pw1234", "Ann", "Lee")
}

#[tokio::test]
async fn test_register_creates_account_and_sends_otp() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    let result = service.register(ann()).await.unwrap();
    assert_eq!(result.email, "a@x.com");
    assert_eq!(result.first_name, "Ann");
    assert_eq!(result.last_name, "Lee");

    let account = store.account("a@x.com").await.unwrap();
    assert_eq!(account.role, Role::Admin);
    assert_eq!(account.registration_step, 0);

    let challenge = account.otp.expect("challenge attached");
    assert_eq!(challenge.code.len(), 6);
    assert_eq!(challenge.expires_at - challenge.issued_at, Duration::minutes(10));

    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(notifier.last_code("a@x.com"), Some(challenge.code));
}

#[tokio::test]
async fn test_register_stores_password_hash_only() {
    let store = InMemoryStore::new();
    let service = account_service(&store, Arc::new(RecordingNotifier::new()));

    service.register(ann()).await.unwrap();

    let account = store.account("a@x.com").await.unwrap();
    let digest = account.password_hash.expect("hash stored");
    assert_ne!(digest, "pw1234");
    assert!(PasswordHasher::new(4).verify("pw1234", &digest));
    assert!(!PasswordHasher::new(4).verify("pw12345", &digest));
}

#[tokio::test]
async fn test_register_returns_verifiable_token() {
    let store = InMemoryStore::new();
    let service = account_service(&store, Arc::new(RecordingNotifier::new()));

    let result = service.register(ann()).await.unwrap();
    let token = result.token.expect("token minted");

    let principal = token_issuer().authenticate(&token).unwrap();
    assert_eq!(principal.email, "a@x.com");
    assert_eq!(principal.role, Role::Admin);
}

#[tokio::test]
async fn test_register_without_session_token() {
    let store = Arc::new(InMemoryStore::new());
    let config = AccountServiceConfig {
        issue_session_token: false,
        ..test_config()
    };
    let service = AccountService::new(
        store.clone(),
        store.clone(),
        Arc::new(RecordingNotifier::new()),
        token_issuer(),
        config,
    );

    let result = service.register(ann()).await.unwrap();
    assert!(result.token.is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    service.register(ann()).await.unwrap();
    let result = service
        .register(RegisterRequest::with_password("a@x.com", "other1", "Anna", "Lim"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateAccount))
    ));
    assert_eq!(store.account_count().await, 1);
    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(store.account("a@x.com").await.unwrap().first_name, "Ann");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_duplicate_register_sends_one_email() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    let (first, second) = tokio::join!(service.register(ann()), service.register(ann()));

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(DomainError::Auth(AuthError::DuplicateAccount)))));
    assert_eq!(store.account_count().await, 1);
    assert_eq!(notifier.sent_count(), 1);
}

#[tokio::test]
async fn test_register_federated_has_no_password() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    let request = RegisterRequest::federated(
        "sso@x.com",
        "Sam",
        "Ong",
        FederatedIdentity::new("google", "1234567890"),
    );
    service.register(request).await.unwrap();

    let account = store.account("sso@x.com").await.unwrap();
    assert!(account.password_hash.is_none());
    assert!(account.is_federated());
    assert!(account.otp.is_some());
    assert_eq!(notifier.sent_count(), 1);
}

#[tokio::test]
async fn test_register_then_verify_succeeds() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    service.register(ann()).await.unwrap();
    let code = notifier.last_code("a@x.com").unwrap();

    service.verify_otp("a@x.com", &code).await.unwrap();

    // Verification leaves the challenge in place
    assert!(store.account("a@x.com").await.unwrap().otp.is_some());
    service.verify_otp("a@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_verify_after_window_is_expired() {
    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(ManualClock::new());
    let service = AccountService::new(
        store.clone(),
        store.clone(),
        notifier.clone(),
        token_issuer(),
        test_config(),
    )
    .with_clock(clock.clone());

    service.register(ann()).await.unwrap();
    let code = notifier.last_code("a@x.com").unwrap();

    clock.advance(Duration::minutes(10));
    service.verify_otp("a@x.com", &code).await.unwrap();

    clock.advance(Duration::seconds(1));
    let result = service.verify_otp("a@x.com", &code).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::OtpExpired))));
}

#[tokio::test]
async fn test_verify_expiry_checked_before_code() {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(ManualClock::new());
    let service = AccountService::new(
        store.clone(),
        store.clone(),
        Arc::new(RecordingNotifier::new()),
        token_issuer(),
        test_config(),
    )
    .with_clock(clock.clone());

    service.register(ann()).await.unwrap();
    clock.advance(Duration::hours(1));

    let result = service.verify_otp("a@x.com", "000000x").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::OtpExpired))));
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    service.register(ann()).await.unwrap();
    let code = notifier.last_code("a@x.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let result = service.verify_otp("a@x.com", wrong).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::OtpMismatch))));
}

#[tokio::test]
async fn test_verify_unknown_account() {
    let store = InMemoryStore::new();
    let service = account_service(&store, Arc::new(RecordingNotifier::new()));

    let result = service.verify_otp("nobody@x.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
}

#[tokio::test]
async fn test_reissue_supersedes_previous_code() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    service.register(ann()).await.unwrap();
    let old_code = notifier.last_code("a@x.com").unwrap();

    // Draw until the new code differs so the mismatch assertion is meaningful
    let mut new_code = old_code.clone();
    while new_code == old_code {
        service.reissue_otp("a@x.com").await.unwrap();
        new_code = notifier.last_code("a@x.com").unwrap();
    }

    let result = service.verify_otp("a@x.com", &old_code).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::OtpMismatch))));
    service.verify_otp("a@x.com", &new_code).await.unwrap();

    let stored = store.account("a@x.com").await.unwrap().otp.unwrap();
    assert_eq!(stored.code, new_code);
}

#[tokio::test]
async fn test_reissue_restarts_validity_window() {
    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(ManualClock::new());
    let service = AccountService::new(
        store.clone(),
        store.clone(),
        notifier.clone(),
        token_issuer(),
        test_config(),
    )
    .with_clock(clock.clone());

    service.register(ann()).await.unwrap();
    clock.advance(Duration::minutes(30));
    service.reissue_otp("a@x.com").await.unwrap();

    clock.advance(Duration::minutes(5));
    let code = notifier.last_code("a@x.com").unwrap();
    service.verify_otp("a@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_reissue_unknown_account() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = account_service(&store, notifier.clone());

    let result = service.reissue_otp("nobody@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_lookup_by_email() {
    let store = InMemoryStore::new();
    let service = account_service(&store, Arc::new(RecordingNotifier::new()));

    service.register(ann()).await.unwrap();
    let summary = service.lookup_by_email("a@x.com").await.unwrap();
    assert_eq!(summary.email, "a@x.com");
    assert_eq!(summary.first_name, "Ann");

    let result = service.lookup_by_email("A@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
}

#[tokio::test]
async fn test_notifier_failure_is_swallowed() {
    let store = Arc::new(InMemoryStore::new());
    let notifier: Arc<dyn Notifier> = Arc::new(FailingNotifier);
    let service: AccountService<InMemoryStore, InMemoryStore> = AccountService::new(
        store.clone(),
        store.clone(),
        notifier,
        token_issuer(),
        test_config(),
    );

    service.register(ann()).await.unwrap();
    assert_eq!(store.account_count().await, 1);

    service.reissue_otp("a@x.com").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_slow_notifier_bounded_by_timeout() {
    let store = Arc::new(InMemoryStore::new());
    let config = AccountServiceConfig {
        dispatch_timeout: StdDuration::from_secs(10),
        ..test_config()
    };
    let service = AccountService::new(
        store.clone(),
        store.clone(),
        Arc::new(SlowNotifier {
            delay: StdDuration::from_secs(3600),
        }),
        token_issuer(),
        config,
    );

    let started = tokio::time::Instant::now();
    let request = RegisterRequest::federated(
        "sso@x.com",
        "Sam",
        "Ong",
        FederatedIdentity::new("google", "42"),
    );
    service.register(request).await.unwrap();

    assert!(started.elapsed() < StdDuration::from_secs(3600));
    assert_eq!(store.account_count().await, 1);
}

#[tokio::test]
async fn test_failure_after_write_rolls_back() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut accounts = FlakyAccountRepository::new(store.clone());
    accounts.fail_after_create = true;
    let service = AccountService::new(
        Arc::new(store.clone()),
        Arc::new(accounts),
        notifier.clone(),
        token_issuer(),
        test_config(),
    );

    let result = service.register(ann()).await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(store.account_count().await, 0);
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_failed_reissue_keeps_previous_code() {
    let store = InMemoryStore::new();
    let notifier = Arc::new(RecordingNotifier::new());
    account_service(&store, notifier.clone())
        .register(ann())
        .await
        .unwrap();
    let code = notifier.last_code("a@x.com").unwrap();

    let mut accounts = FlakyAccountRepository::new(store.clone());
    accounts.fail_update = true;
    let service = AccountService::new(
        Arc::new(store.clone()),
        Arc::new(accounts),
        notifier.clone(),
        token_issuer(),
        test_config(),
    );

    let result = service.reissue_otp("a@x.com").await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(store.account("a@x.com").await.unwrap().otp.unwrap().code, code);
}
