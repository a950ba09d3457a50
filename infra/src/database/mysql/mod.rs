//! MySQL repository implementations

mod account_repository_impl;
mod company_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use company_repository_impl::MySqlCompanyRepository;

use ed_core::errors::DomainError;

/// Maps a driver error onto the domain storage failure
pub(crate) fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::storage(format!("{}: {}", context, error))
}

pub(crate) fn column_error(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to read column {}: {}", column, error))
}
