//! File-backed preference store.
//!
//! Remembers the issuers a user has dealt with per currency, plus generic
//! cached string entries (signer lists and the like). Stored as a JSON
//! file; mutations happen in memory and persist on an explicit `save`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::WalletError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreferenceStore {
    #[serde(default)]
    known_issuers: HashMap<String, Vec<String>>,
    #[serde(default)]
    entries: HashMap<String, String>,
}

impl PreferenceStore {
    /// Load preferences from disk. A missing file is an empty store, not
    /// an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Store(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| WalletError::Store(format!("corrupt preference file: {e}")))
    }

    /// Persist the store as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WalletError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::Store(format!("serialization failed: {e}")))?;
        std::fs::write(path, raw)
            .map_err(|e| WalletError::Store(format!("failed to write {}: {e}", path.display())))
    }

    /// The issuers previously used for a currency code.
    pub fn known_issuers(&self, currency: &str) -> &[String] {
        self.known_issuers
            .get(currency)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remember an issuer for a currency. Duplicates are ignored.
    pub fn add_known_issuer(&mut self, currency: &str, issuer: &str) {
        let issuers = self.known_issuers.entry(currency.to_string()).or_default();
        if !issuers.iter().any(|known| known == issuer) {
            issuers.push(issuer.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::load(dir.path().join("prefs.json")).unwrap();
        assert!(store.known_issuers("USD").is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = PreferenceStore::default();
        store.add_known_issuer("USD", "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn");
        store.add_known_issuer("USD", "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn");
        store.add_known_issuer("EUR", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        store.set("signer_list", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        store.save(&path).unwrap();

        let loaded = PreferenceStore::load(&path).unwrap();
        assert_eq!(
            loaded.known_issuers("USD"),
            ["rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn"]
        );
        assert_eq!(loaded.known_issuers("EUR").len(), 1);
        assert_eq!(
            loaded.get("signer_list"),
            Some("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")
        );
        assert_eq!(loaded.get("absent"), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            PreferenceStore::load(&path),
            Err(WalletError::Store(_))
        ));
    }
}
