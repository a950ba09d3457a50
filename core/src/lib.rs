//! # EDash Core
//!
//! Account lifecycle and OTP verification engine for the EDash rental
//! dashboard. This crate contains domain entities, the error taxonomy,
//! repository and transaction interfaces, and the services built on them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{
    complete, AccountRepository, CompanyRepository, InMemoryStore, InMemoryTransaction,
    Transaction, TransactionManager,
};
pub use services::{AccountService, CompanyService, Notifier, TokenIssuer};
