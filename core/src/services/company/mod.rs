//! Company onboarding module
//!
//! Binds an authenticated account to its company and keeps the company
//! profile up to date.

mod service;

#[cfg(test)]
mod tests;

pub use service::CompanyService;
