//! Turnero Library
//!
//! Core library modules for the turnero appointment booking service.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

/// Crate version as baked in at compile time.
pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
