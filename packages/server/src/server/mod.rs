pub mod app;
pub mod auth;
pub mod middleware;
pub mod routes;

pub use app::{build_app, AppState};
