//! Durable storage for the access token.
//!
//! Exactly one named slot holding one opaque string. Backends differ in
//! where the slot lives (memory, a JSON file under the cache dir, the OS
//! keychain); none of them know what the token means.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use keyring::Entry;
use serde::{Deserialize, Serialize};

/// Keychain service name
const SERVICE_NAME: &str = "storefront-client";

/// Slot name, shared by the keychain account and the slot file
const TOKEN_SLOT: &str = "access_token";

/// Slot file name in the cache directory
const TOKEN_FILE: &str = "token.json";

/// One-slot token storage.
///
/// `read` must be safe to call in any context, so backends map every
/// failure to `None` instead of erroring. `clear` on an empty slot is a
/// no-op.
pub trait TokenStore: Send + Sync {
    /// Write the slot, replacing any prior value.
    fn store(&self, token: &str) -> Result<()>;

    /// Current value, or `None` if the slot is empty or unreadable.
    fn read(&self) -> Option<String>;

    /// Remove the slot. Idempotent.
    fn clear(&self) -> Result<()>;
}

/// Non-durable store for tests and contexts with no storage access.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn store(&self, token: &str) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    stored_at: DateTime<Utc>,
}

/// File-backed store: one JSON slot file under the platform cache dir.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<cache_dir>/storefront-client/token.json`
    pub fn in_cache_dir() -> Result<Self> {
        let cache_dir = dirs::cache_dir().context("Could not find cache directory")?;
        Ok(Self::new(cache_dir.join(SERVICE_NAME).join(TOKEN_FILE)))
    }
}

impl TokenStore for FileTokenStore {
    fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        let record = StoredToken {
            access_token: token.to_string(),
            stored_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, contents).context("Failed to write token file")?;
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let record: StoredToken = serde_json::from_str(&contents).ok()?;
        Some(record.access_token)
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

/// Keychain-backed store using the OS credential manager.
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_SLOT).context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn store(&self, token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .context("Failed to store token in keychain")?;
        Ok(())
    }

    fn read(&self) -> Option<String> {
        Self::entry().ok()?.get_password().ok()
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err).context("Failed to delete token from keychain"),
        }
    }
}
