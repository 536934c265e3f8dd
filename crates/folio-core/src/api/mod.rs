//! REST API client module for the gallery backend.
//!
//! This module provides the `ApiClient` for listing works and categories,
//! uploading new works and deleting existing ones.
//!
//! Mutating requests carry the session's bearer token, obtained through
//! the `/users/login` endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
