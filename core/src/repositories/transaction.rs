//! Transaction scope shared by every repository.
//!
//! Each service operation runs inside exactly one transaction: it calls
//! [`TransactionManager::begin`], threads the handle through every repository
//! call, and hands the outcome to [`complete`], which commits on success and
//! rolls back on failure before the error propagates.
//!
//! A transaction that is dropped without being completed (for example because
//! the task panicked) never becomes visible: implementations discard or roll
//! back uncommitted work on drop.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// An open unit of work
#[async_trait]
pub trait Transaction: Send + Sized + 'static {
    /// Makes every write performed through this handle visible atomically
    async fn commit(self) -> DomainResult<()>;

    /// Discards every write performed through this handle
    async fn rollback(self) -> DomainResult<()>;
}

/// Opens transactions against a store
///
/// # Example
/// ```no_run
/// # use ed_core::repositories::{complete, AccountRepository, TransactionManager};
/// # use ed_core::errors::DomainResult;
/// # async fn example<M, A>(store: &M, accounts: &A) -> DomainResult<()>
/// # where M: TransactionManager, A: AccountRepository<M::Tx> {
/// let mut tx = store.begin().await?;
/// let outcome = accounts.find_by_email(&mut tx, "ann@example.com").await;
/// let account = complete(tx, outcome).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TransactionManager: Send + Sync + 'static {
    type Tx: Transaction;

    /// Opens a new transaction
    async fn begin(&self) -> DomainResult<Self::Tx>;
}

/// Commits `tx` if `outcome` is a success, otherwise rolls it back
///
/// The original error is returned unchanged when rolling back; a failing
/// rollback is logged. A failing commit turns a success into that error.
pub async fn complete<T, Tx: Transaction>(tx: Tx, outcome: DomainResult<T>) -> DomainResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::error!(
                    error = %rollback_error,
                    cause = %error,
                    event = "transaction_rollback_failed",
                    "Failed to roll back transaction"
                );
            }
            Err(error)
        }
    }
}
