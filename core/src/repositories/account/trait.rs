//! Account repository trait defining the interface for account persistence.
//!
//! All calls run inside the caller's transaction. Email uniqueness is checked
//! by the lifecycle service with a read-before-write inside that transaction;
//! implementations additionally enforce it at the storage boundary and report
//! a violation as `AuthError::DuplicateAccount`.

use async_trait::async_trait;

use crate::domain::entities::{Account, NewAccount};
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ed_core::repositories::AccountRepository;
/// use ed_core::domain::entities::{Account, NewAccount};
/// use ed_core::errors::DomainError;
///
/// struct PgAccountRepository;
/// struct PgTx;
///
/// #[async_trait]
/// impl AccountRepository<PgTx> for PgAccountRepository {
///     async fn find_by_email(
///         &self,
///         tx: &mut PgTx,
///         email: &str,
///     ) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn create(&self, tx: &mut PgTx, account: NewAccount) -> Result<Account, DomainError> { unimplemented!() }
/// #   async fn update(&self, tx: &mut PgTx, account: Account) -> Result<Account, DomainError> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait AccountRepository<Tx: Send>: Send + Sync + 'static {
    /// Find an account by its exact email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, tx: &mut Tx, email: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account; the store assigns its identifier
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Auth(AuthError::DuplicateAccount))` - Email already taken
    /// * `Err(DomainError)` - Storage failure
    async fn create(&self, tx: &mut Tx, account: NewAccount) -> Result<Account, DomainError>;

    /// Overwrite an existing account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError)` - Account does not exist or storage failure
    async fn update(&self, tx: &mut Tx, account: Account) -> Result<Account, DomainError>;
}
