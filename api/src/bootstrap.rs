//! Composition root
//!
//! Every collaborator the services need is constructed here from
//! [`AppConfig`] and injected explicitly.

use std::sync::Arc;

use ed_core::repositories::{AccountRepository, CompanyRepository, InMemoryStore, TransactionManager};
use ed_core::services::{
    AccountService, AccountServiceConfig, CompanyService, Notifier, TokenIssuer, TokenIssuerConfig,
};
use ed_infra::mail::create_notifier;
use ed_infra::InfrastructureError;
use ed_shared::AppConfig;

use crate::state::AppState;

#[cfg(feature = "mysql")]
use ed_infra::database::{
    DatabasePool, MySqlAccountRepository, MySqlCompanyRepository, MySqlTransactionManager,
};

/// Fully wired services for one storage backend
pub struct Services<M, A, C> {
    pub state: AppState<M, A, C>,
    pub tokens: Arc<TokenIssuer>,
}

/// Token issuer configured from `auth.jwt`
pub fn token_issuer(config: &AppConfig) -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(TokenIssuerConfig::from(&config.auth.jwt)))
}

/// Wire the services around an already opened store
pub fn build_services<M, A, C>(
    config: &AppConfig,
    store: Arc<M>,
    accounts: Arc<A>,
    companies: Arc<C>,
    notifier: Arc<dyn Notifier>,
) -> Services<M, A, C>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    let tokens = token_issuer(config);
    let service_config = AccountServiceConfig::from_settings(&config.otp, &config.auth.password);

    let account_service = AccountService::new(
        Arc::clone(&store),
        Arc::clone(&accounts),
        notifier,
        Arc::clone(&tokens),
        service_config,
    );
    let company_service = CompanyService::new(store, accounts, companies);

    Services {
        state: AppState::new(Arc::new(account_service), Arc::new(company_service)),
        tokens,
    }
}

/// Services backed by the process-local store
pub fn memory_services(
    config: &AppConfig,
) -> Result<Services<InMemoryStore, InMemoryStore, InMemoryStore>, InfrastructureError> {
    let store = Arc::new(InMemoryStore::new());
    let notifier = create_notifier(&config.mail)?;
    Ok(build_services(
        config,
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        notifier,
    ))
}

/// Services backed by MySQL
///
/// Opens the pool and, when `database.run_migrations` is set, applies the
/// bundled migrations before returning.
#[cfg(feature = "mysql")]
pub async fn mysql_services(
    config: &AppConfig,
) -> Result<
    Services<MySqlTransactionManager, MySqlAccountRepository, MySqlCompanyRepository>,
    InfrastructureError,
> {
    let pool = DatabasePool::new(&config.database).await?;
    if config.database.run_migrations {
        pool.run_migrations().await?;
    }

    let store = Arc::new(MySqlTransactionManager::new(pool.get_pool().clone()));
    let notifier = create_notifier(&config.mail)?;

    Ok(build_services(
        config,
        store,
        Arc::new(MySqlAccountRepository::new()),
        Arc::new(MySqlCompanyRepository::new()),
        notifier,
    ))
}
