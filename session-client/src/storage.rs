use std::collections::HashMap;
use std::sync::RwLock;

use crate::ports::TokenStore;

/// The single canonical storage key for the session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Per-role token keys written by earlier releases. Never read for
/// bootstrap; purged (and at most promoted once) by the bootstrap
/// migration.
pub const LEGACY_TOKEN_KEYS: [&str; 6] = [
    "salesAuthToken",
    "hospitalAuthToken",
    "agentAuthToken",
    "adminAuthToken",
    "crmAuthToken",
    "supportAuthToken",
];

/// First-visit UI flag from earlier releases, removed alongside the legacy
/// token keys.
pub const FIRST_VISIT_KEY: &str = "firstVisit";

/// One-time storage migration run at bootstrap.
///
/// If no canonical token exists but a legacy per-role key holds one, the
/// first legacy value (in `LEGACY_TOKEN_KEYS` order) is promoted to the
/// canonical key. All legacy keys and the first-visit flag are removed
/// either way, so sign-out only ever has one key to clear.
pub fn migrate_legacy_keys<S: TokenStore>(storage: &S) {
    let mut promoted = false;

    for key in LEGACY_TOKEN_KEYS {
        if let Some(token) = storage.get(key) {
            if !promoted && storage.get(AUTH_TOKEN_KEY).is_none() {
                tracing::info!(from = key, "Promoting legacy session token");
                storage.set(AUTH_TOKEN_KEY, &token);
                promoted = true;
            }
            storage.remove(key);
        }
    }

    storage.remove(FIRST_VISIT_KEY);
}

/// In-memory token store.
///
/// Stands in for the browser's local storage in tests and non-browser
/// hosts. Shared across stores by cloning the same instance behind an Arc.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);

        store.set(AUTH_TOKEN_KEY, "token-value");
        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("token-value".to_string()));

        store.remove(AUTH_TOKEN_KEY);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_migration_promotes_first_legacy_token() {
        let store = MemoryTokenStore::new();
        store.set("hospitalAuthToken", "legacy-hospital");
        store.set("crmAuthToken", "legacy-crm");
        store.set(FIRST_VISIT_KEY, "false");

        migrate_legacy_keys(&store);

        // "hospitalAuthToken" precedes "crmAuthToken" in key order
        assert_eq!(
            store.get(AUTH_TOKEN_KEY),
            Some("legacy-hospital".to_string())
        );
        for key in LEGACY_TOKEN_KEYS {
            assert_eq!(store.get(key), None);
        }
        assert_eq!(store.get(FIRST_VISIT_KEY), None);
    }

    #[test]
    fn test_migration_never_overwrites_canonical_token() {
        let store = MemoryTokenStore::new();
        store.set(AUTH_TOKEN_KEY, "current");
        store.set("adminAuthToken", "stale");

        migrate_legacy_keys(&store);

        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("current".to_string()));
        assert_eq!(store.get("adminAuthToken"), None);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.set("salesAuthToken", "legacy");

        migrate_legacy_keys(&store);
        migrate_legacy_keys(&store);

        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("legacy".to_string()));
    }
}
