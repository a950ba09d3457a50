//! Company onboarding endpoints, all secured
//!
//! - `GET /show`
//! - `POST /save`
//! - `POST /update`

pub mod profile;

pub use profile::{save_company, show_company, update_company};
