//! Process-local transactional store.
//!
//! Writes made through an [`InMemoryTransaction`] are staged on the handle and
//! only applied to the shared state on commit, so an uncommitted or rolled back
//! transaction leaves the store untouched. Creating an account reserves its
//! email for the lifetime of the transaction, so a concurrent transaction
//! creating the same email fails at `create` rather than at commit. The
//! reservation is released on commit, rollback or drop.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, Company, CompanyDetails, NewAccount};
use crate::errors::{AuthError, DomainError, DomainResult};

use super::{AccountRepository, CompanyRepository, Transaction, TransactionManager};

#[derive(Debug, Default)]
struct StoreState {
    accounts: HashMap<Uuid, Account>,
    companies: HashMap<Uuid, Company>,
}

type Reservations = Arc<Mutex<HashSet<String>>>;

fn lock_reservations(reserved: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    reserved.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory account and company store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    reserved: Reservations,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed account with `email`
    pub async fn account(&self, email: &str) -> Option<Account> {
        let state = self.state.read().await;
        state.accounts.values().find(|a| a.email == email).cloned()
    }

    /// Committed company with `id`
    pub async fn company(&self, id: Uuid) -> Option<Company> {
        self.state.read().await.companies.get(&id).cloned()
    }

    /// Number of committed accounts
    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Number of committed companies
    pub async fn company_count(&self) -> usize {
        self.state.read().await.companies.len()
    }
}

/// Open transaction on an [`InMemoryStore`]
#[derive(Debug)]
pub struct InMemoryTransaction {
    state: Arc<RwLock<StoreState>>,
    reserved: Reservations,
    reservations: Vec<String>,
    accounts: HashMap<Uuid, Account>,
    companies: HashMap<Uuid, Company>,
}

impl InMemoryTransaction {
    fn release(&mut self) {
        if self.reservations.is_empty() {
            return;
        }
        let mut reserved = lock_reservations(&self.reserved);
        for email in self.reservations.drain(..) {
            reserved.remove(&email);
        }
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        self.release();
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> DomainResult<()> {
        let shared = Arc::clone(&self.state);
        let mut state = shared.write().await;

        let conflict = self.accounts.values().any(|staged| {
            state
                .accounts
                .values()
                .any(|existing| existing.email == staged.email && existing.id != staged.id)
        });
        if conflict {
            return Err(AuthError::DuplicateAccount.into());
        }

        state.accounts.extend(std::mem::take(&mut self.accounts));
        state.companies.extend(std::mem::take(&mut self.companies));
        self.release();
        Ok(())
    }

    async fn rollback(mut self) -> DomainResult<()> {
        self.release();
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> DomainResult<Self::Tx> {
        Ok(InMemoryTransaction {
            state: Arc::clone(&self.state),
            reserved: Arc::clone(&self.reserved),
            reservations: Vec::new(),
            accounts: HashMap::new(),
            companies: HashMap::new(),
        })
    }
}

#[async_trait]
impl AccountRepository<InMemoryTransaction> for InMemoryStore {
    async fn find_by_email(
        &self,
        tx: &mut InMemoryTransaction,
        email: &str,
    ) -> Result<Option<Account>, DomainError> {
        if let Some(staged) = tx.accounts.values().find(|a| a.email == email) {
            return Ok(Some(staged.clone()));
        }
        let state = tx.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.email == email && !tx.accounts.contains_key(&a.id))
            .cloned())
    }

    async fn create(
        &self,
        tx: &mut InMemoryTransaction,
        account: NewAccount,
    ) -> Result<Account, DomainError> {
        {
            let state = tx.state.read().await;
            let taken = state.accounts.values().any(|a| a.email == account.email)
                || tx.accounts.values().any(|a| a.email == account.email);
            if taken {
                return Err(AuthError::DuplicateAccount.into());
            }
            // Checked under the read lock so a commit cannot slip in between.
            if !lock_reservations(&tx.reserved).insert(account.email.clone()) {
                return Err(AuthError::DuplicateAccount.into());
            }
        }
        tx.reservations.push(account.email.clone());

        let created = Account::from_new(Uuid::new_v4(), account, Utc::now());
        tx.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        tx: &mut InMemoryTransaction,
        account: Account,
    ) -> Result<Account, DomainError> {
        let exists = tx.accounts.contains_key(&account.id)
            || tx.state.read().await.accounts.contains_key(&account.id);
        if !exists {
            return Err(DomainError::storage(format!(
                "account {} does not exist",
                account.id
            )));
        }
        tx.accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[async_trait]
impl CompanyRepository<InMemoryTransaction> for InMemoryStore {
    async fn create(
        &self,
        tx: &mut InMemoryTransaction,
        details: CompanyDetails,
    ) -> Result<Company, DomainError> {
        let company = Company::from_new(Uuid::new_v4(), details, Utc::now());
        tx.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn update(
        &self,
        tx: &mut InMemoryTransaction,
        company: Company,
    ) -> Result<Company, DomainError> {
        let exists = tx.companies.contains_key(&company.id)
            || tx.state.read().await.companies.contains_key(&company.id);
        if !exists {
            return Err(DomainError::storage(format!(
                "company {} does not exist",
                company.id
            )));
        }
        tx.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn find_by_id(
        &self,
        tx: &mut InMemoryTransaction,
        id: Uuid,
    ) -> Result<Option<Company>, DomainError> {
        if let Some(staged) = tx.companies.get(&id) {
            return Ok(Some(staged.clone()));
        }
        Ok(tx.state.read().await.companies.get(&id).cloned())
    }
}
