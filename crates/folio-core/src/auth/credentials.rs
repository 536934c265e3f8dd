use anyhow::{Context, Result};
use keyring::Entry;

use super::TokenStore;

const SERVICE_NAME: &str = "folio";

/// Fixed keychain account the token is stored under
const TOKEN_KEY: &str = "token";

/// Token kept in the OS keychain.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a different keychain service name (separate profiles, tests)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        assert_eq!(KeyringTokenStore::new().service, SERVICE_NAME);
        assert_eq!(KeyringTokenStore::default().service, "folio");
        assert_eq!(KeyringTokenStore::with_service("folio-test").service, "folio-test");
    }

    // Touches the real OS keychain; run with `cargo test -- --ignored`
    #[test]
    #[ignore]
    fn test_keyring_roundtrip() {
        let store = KeyringTokenStore::with_service("folio-test-roundtrip");
        store.clear().expect("clear before test");
        assert_eq!(store.get().expect("read empty"), None);

        store.set("abc").expect("store token");
        assert_eq!(store.get().expect("read token").as_deref(), Some("abc"));

        store.clear().expect("clear token");
        store.clear().expect("clear again");
        assert_eq!(store.get().expect("read cleared"), None);
    }
}
