//! Company repository trait, sharing the account store's transactions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Company, CompanyDetails};
use crate::errors::DomainError;

/// Repository trait for Company persistence operations
#[async_trait]
pub trait CompanyRepository<Tx: Send>: Send + Sync + 'static {
    /// Insert a new company; the store assigns its identifier
    async fn create(&self, tx: &mut Tx, details: CompanyDetails) -> Result<Company, DomainError>;

    /// Overwrite an existing company
    async fn update(&self, tx: &mut Tx, company: Company) -> Result<Company, DomainError>;

    /// Find a company by identifier
    async fn find_by_id(&self, tx: &mut Tx, id: Uuid) -> Result<Option<Company>, DomainError>;
}
