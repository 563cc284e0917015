//! HTTP layer: server wiring, error mapping, extractors, routes

pub mod error;
pub mod extractors;
pub mod responses;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};
