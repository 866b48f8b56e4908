//! Authentication module for credential storage and session teardown.
//!
//! This module provides:
//! - `CredentialStore`: the access/refresh token slots shared by every request
//! - `KeyringCredentialStore`: OS keychain backed store via keyring
//! - `MemoryCredentialStore`: in-process store for tests
//! - `SessionTerminator`: the "log out and go to login" action

pub mod credentials;
pub mod session;

pub use credentials::{
    CredentialError, CredentialStore, KeyringCredentialStore, MemoryCredentialStore, TokenSlot,
    DEFAULT_SERVICE_NAME,
};
pub use session::{ClearingTerminator, SessionTerminator};
