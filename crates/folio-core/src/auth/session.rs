use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, TokenStoreKind};

use super::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};

/// Session manager: owns the token store and performs the login handshake.
///
/// Passed by reference to every authenticated API call.
pub struct Session {
    store: Box<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Session with a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Open the store selected by the configuration
    pub fn open(config: &Config) -> Result<Self> {
        let session = match config.token_store {
            TokenStoreKind::File => Self::new(FileTokenStore::new(config.data_dir()?)),
            TokenStoreKind::Keyring => Self::new(KeyringTokenStore::new()),
        };
        debug!(store = ?config.token_store, "Session opened");
        Ok(session)
    }

    /// Send the credentials to the backend and persist the returned token.
    ///
    /// Storage is untouched unless the backend accepts the credentials.
    pub async fn login(&self, client: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
        let token = client.authenticate(email, password).await?;
        self.set_token(&token)?;
        info!("Login successful");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.store.get()?)
    }

    pub fn set_token(&self, token: &str) -> Result<(), ApiError> {
        Ok(self.store.set(token)?)
    }

    /// Token to send as `Authorization: Bearer`. An empty stored token
    /// counts as absent.
    pub fn bearer(&self) -> Result<Option<String>, ApiError> {
        Ok(self.token()?.filter(|t| !t.is_empty()))
    }

    /// True when a usable token is present; a store that cannot be read counts as absent
    pub fn is_authenticated(&self) -> bool {
        match self.bearer() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read token store");
                false
            }
        }
    }
}
