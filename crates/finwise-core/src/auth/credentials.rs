use std::collections::HashMap;
use std::sync::RwLock;

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

use crate::models::TokenPair;

/// Default keychain service name for stored tokens
pub const DEFAULT_SERVICE_NAME: &str = "finwise";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Credential store lock poisoned")]
    Poisoned,

    #[error("Stored token cannot be sent as a header value")]
    MalformedToken,
}

/// The two named slots of a credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSlot {
    Access,
    Refresh,
}

impl TokenSlot {
    pub const ALL: [TokenSlot; 2] = [TokenSlot::Access, TokenSlot::Refresh];

    pub fn key(&self) -> &'static str {
        match self {
            TokenSlot::Access => "access",
            TokenSlot::Refresh => "refresh",
        }
    }
}

/// Persistent key/value store holding the current access and refresh tokens.
///
/// Shared by every in-flight request and by logout flows. Writers race
/// last-write-wins; readers always see whatever was stored most recently.
pub trait CredentialStore: Send + Sync {
    fn get(&self, slot: TokenSlot) -> Result<Option<String>, CredentialError>;

    fn set(&self, slot: TokenSlot, value: &str) -> Result<(), CredentialError>;

    /// Remove a slot. Clearing an empty slot is not an error.
    fn clear(&self, slot: TokenSlot) -> Result<(), CredentialError>;

    fn clear_all(&self) -> Result<(), CredentialError> {
        for slot in TokenSlot::ALL {
            self.clear(slot)?;
        }
        Ok(())
    }

    fn store_pair(&self, pair: &TokenPair) -> Result<(), CredentialError> {
        self.set(TokenSlot::Access, &pair.access)?;
        self.set(TokenSlot::Refresh, &pair.refresh)
    }

    fn has_session(&self) -> bool {
        matches!(self.get(TokenSlot::Refresh), Ok(Some(_)))
    }
}

/// Token storage in the OS keychain, so a session survives restarts.
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, slot: TokenSlot) -> Result<Entry, CredentialError> {
        Ok(Entry::new(&self.service, slot.key())?)
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self, slot: TokenSlot) -> Result<Option<String>, CredentialError> {
        match self.entry(slot)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, slot: TokenSlot, value: &str) -> Result<(), CredentialError> {
        self.entry(slot)?.set_password(value)?;
        debug!(slot = slot.key(), "Stored token in keychain");
        Ok(())
    }

    fn clear(&self, slot: TokenSlot) -> Result<(), CredentialError> {
        match self.entry(slot)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store. Used by tests and for sessions that should not persist.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slots: RwLock<HashMap<TokenSlot, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        let mut slots = HashMap::new();
        if let Some(access) = access {
            slots.insert(TokenSlot::Access, access.to_string());
        }
        if let Some(refresh) = refresh {
            slots.insert(TokenSlot::Refresh, refresh.to_string());
        }
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, slot: TokenSlot) -> Result<Option<String>, CredentialError> {
        let slots = self.slots.read().map_err(|_| CredentialError::Poisoned)?;
        Ok(slots.get(&slot).cloned())
    }

    fn set(&self, slot: TokenSlot, value: &str) -> Result<(), CredentialError> {
        let mut slots = self.slots.write().map_err(|_| CredentialError::Poisoned)?;
        slots.insert(slot, value.to_string());
        Ok(())
    }

    fn clear(&self, slot: TokenSlot) -> Result<(), CredentialError> {
        let mut slots = self.slots.write().map_err(|_| CredentialError::Poisoned)?;
        slots.remove(&slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys() {
        assert_eq!(TokenSlot::Access.key(), "access");
        assert_eq!(TokenSlot::Refresh.key(), "refresh");
    }

    #[test]
    fn test_memory_store_set_get_clear() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(TokenSlot::Access).unwrap(), None);

        store.set(TokenSlot::Access, "A1").unwrap();
        assert_eq!(store.get(TokenSlot::Access).unwrap().as_deref(), Some("A1"));

        // Last write wins
        store.set(TokenSlot::Access, "A2").unwrap();
        assert_eq!(store.get(TokenSlot::Access).unwrap().as_deref(), Some("A2"));

        store.clear(TokenSlot::Access).unwrap();
        assert_eq!(store.get(TokenSlot::Access).unwrap(), None);

        // Clearing an empty slot is fine
        store.clear(TokenSlot::Access).unwrap();
    }

    #[test]
    fn test_store_pair_and_clear_all() {
        let store = MemoryCredentialStore::new();
        assert!(!store.has_session());

        store
            .store_pair(&TokenPair {
                access: "A1".to_string(),
                refresh: "R1".to_string(),
            })
            .unwrap();
        assert!(store.has_session());
        assert_eq!(store.get(TokenSlot::Refresh).unwrap().as_deref(), Some("R1"));

        store.clear_all().unwrap();
        assert_eq!(store.get(TokenSlot::Access).unwrap(), None);
        assert_eq!(store.get(TokenSlot::Refresh).unwrap(), None);
    }

    #[test]
    fn test_with_tokens_partial() {
        let store = MemoryCredentialStore::with_tokens(Some("A1"), None);
        assert_eq!(store.get(TokenSlot::Access).unwrap().as_deref(), Some("A1"));
        assert_eq!(store.get(TokenSlot::Refresh).unwrap(), None);
        assert!(!store.has_session());
    }
}
