//! Shared handler state.

use std::sync::Arc;

use ed_core::services::{AccountService, CompanyService};

/// Services handed to every handler through `web::Data`
pub struct AppState<M, A, C> {
    pub account_service: Arc<AccountService<M, A>>,
    pub company_service: Arc<CompanyService<M, A, C>>,
}

impl<M, A, C> AppState<M, A, C> {
    pub fn new(
        account_service: Arc<AccountService<M, A>>,
        company_service: Arc<CompanyService<M, A, C>>,
    ) -> Self {
        Self {
            account_service,
            company_service,
        }
    }
}

impl<M, A, C> Clone for AppState<M, A, C> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            company_service: Arc::clone(&self.company_service),
        }
    }
}
