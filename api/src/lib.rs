//! EDash HTTP API
//!
//! actix-web transport over the `ed_core` services: request validation,
//! bearer token authentication and the JSON response envelopes.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use handlers::ApiError;
pub use state::AppState;
