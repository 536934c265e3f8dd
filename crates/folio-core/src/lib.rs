//! Folio core: session, API access and in-memory gallery for a portfolio
//! backend.

pub mod api;
pub mod auth;
pub mod config;
pub mod gallery;
pub mod models;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError};
pub use auth::Session;
pub use config::Config;
pub use gallery::Gallery;
