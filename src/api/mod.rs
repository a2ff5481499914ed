//! HTTP entry layer: validates requests, forwards them to the generator and
//! serializes the result.

pub mod routes;
pub mod server;

pub use server::{build_router, start_server, AppState};
