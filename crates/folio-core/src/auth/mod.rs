//! Authentication module for managing the bearer token.
//!
//! This module provides:
//! - `Session`: the session manager (login handshake, logout, token access)
//! - `TokenStore`: persistence seam for the single token value
//! - `FileTokenStore`, `KeyringTokenStore`, `MemoryTokenStore`: store backends
//!
//! Tokens never expire client-side; they live until `logout` clears them.

pub mod credentials;
pub mod session;
pub mod store;

pub use credentials::KeyringTokenStore;
pub use session::Session;
pub use store::{FileTokenStore, MemoryTokenStore, StoredToken, TokenStore};
