//! Company onboarding service implementation

use std::sync::Arc;

use crate::domain::entities::{Account, Company, CompanyDetails, Principal};
use crate::domain::value_objects::CompanyProfile;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{complete, AccountRepository, CompanyRepository, TransactionManager};

/// Company onboarding service
///
/// Each operation runs in one transaction shared by the account and company
/// repositories, so a failed account update also discards the company insert.
pub struct CompanyService<M, A, C> {
    store: Arc<M>,
    accounts: Arc<A>,
    companies: Arc<C>,
}

impl<M, A, C> CompanyService<M, A, C>
where
    M: TransactionManager,
    A: AccountRepository<M::Tx>,
    C: CompanyRepository<M::Tx>,
{
    pub fn new(store: Arc<M>, accounts: Arc<A>, companies: Arc<C>) -> Self {
        Self {
            store,
            accounts,
            companies,
        }
    }

    /// Create a company and attach it to the principal's account
    ///
    /// # Returns
    ///
    /// * `Ok(CompanyProfile)` - Company stored, account moved to registration step 1 or later
    /// * `Err(DomainError::Auth(AuthError::AccountNotFound))` - Principal has no account
    pub async fn save_company(
        &self,
        principal: &Principal,
        details: CompanyDetails,
    ) -> DomainResult<CompanyProfile> {
        let mut tx = self.store.begin().await?;
        let outcome = self.save_company_in(&mut tx, principal, details).await;
        complete(tx, outcome).await
    }

    async fn save_company_in(
        &self,
        tx: &mut M::Tx,
        principal: &Principal,
        details: CompanyDetails,
    ) -> DomainResult<CompanyProfile> {
        let company = self.companies.create(tx, details).await?;

        let mut account = self.find_account(tx, principal).await?;
        account.assign_company(company.id);
        self.accounts.update(tx, account).await?;

        Ok(CompanyProfile::from(&company))
    }

    /// Overwrite the profile of the principal's company
    pub async fn update_company(
        &self,
        principal: &Principal,
        details: CompanyDetails,
    ) -> DomainResult<CompanyProfile> {
        let mut tx = self.store.begin().await?;
        let outcome = self.update_company_in(&mut tx, principal, details).await;
        complete(tx, outcome).await
    }

    async fn update_company_in(
        &self,
        tx: &mut M::Tx,
        principal: &Principal,
        details: CompanyDetails,
    ) -> DomainResult<CompanyProfile> {
        let mut company = self.find_company(tx, principal).await?;
        company.apply(details);
        let company = self.companies.update(tx, company).await?;
        Ok(CompanyProfile::from(&company))
    }

    /// Read the principal's company
    pub async fn get_company(&self, principal: &Principal) -> DomainResult<CompanyProfile> {
        let mut tx = self.store.begin().await?;
        let outcome = self
            .find_company(&mut tx, principal)
            .await
            .map(|company| CompanyProfile::from(&company));
        complete(tx, outcome).await
    }

    async fn find_account(&self, tx: &mut M::Tx, principal: &Principal) -> DomainResult<Account> {
        self.accounts
            .find_by_email(tx, &principal.email)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    async fn find_company(&self, tx: &mut M::Tx, principal: &Principal) -> DomainResult<Company> {
        let account = self.find_account(tx, principal).await?;
        let company_id = account.company_id.ok_or(AuthError::CompanyNotFound)?;
        self.companies
            .find_by_id(tx, company_id)
            .await?
            .ok_or_else(|| AuthError::CompanyNotFound.into())
    }
}
