//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Transaction manager shared by every repository
//! - Account and company repositories

pub mod connection;
pub mod mysql;
pub mod transaction;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAccountRepository, MySqlCompanyRepository};
pub use transaction::{MySqlTransactionManager, MySqlTx};
