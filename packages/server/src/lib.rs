// Mindfully Psychiatry Intake - API Core
//
// This crate provides the backend API for the psychiatry intake directory:
// a public search over psychiatrist providers and a password-gated admin
// boundary for managing providers and the filter taxonomy.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
