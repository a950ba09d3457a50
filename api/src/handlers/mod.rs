pub mod error;

pub use error::{status_for, status_text, ApiError};
