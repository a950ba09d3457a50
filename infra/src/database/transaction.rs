//! MySQL-backed transaction scope

use async_trait::async_trait;
use ed_core::errors::{DomainError, DomainResult};
use ed_core::repositories::{Transaction, TransactionManager};
use sqlx::{MySql, MySqlConnection, MySqlPool};

/// Open MySQL transaction
///
/// Dropping it without committing rolls the work back.
pub struct MySqlTx(sqlx::Transaction<'static, MySql>);

impl MySqlTx {
    pub(crate) fn conn(&mut self) -> &mut MySqlConnection {
        &mut *self.0
    }
}

#[async_trait]
impl Transaction for MySqlTx {
    async fn commit(self) -> DomainResult<()> {
        self.0
            .commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(self) -> DomainResult<()> {
        self.0
            .rollback()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to roll back transaction: {}", e)))
    }
}

/// Opens transactions on the pool
#[derive(Clone)]
pub struct MySqlTransactionManager {
    pool: MySqlPool,
}

impl MySqlTransactionManager {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for MySqlTransactionManager {
    type Tx = MySqlTx;

    async fn begin(&self) -> DomainResult<MySqlTx> {
        self.pool
            .begin()
            .await
            .map(MySqlTx)
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))
    }
}
