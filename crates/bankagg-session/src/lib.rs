//! Key-value session state shared by the resolvers and the CLI.
//!
//! A flat string map with a handful of well-known keys, mirroring the
//! browser-local storage of the original deployment target. Access is
//! lock-guarded with last-write-wins semantics; the whole store is
//! dropped at logout.

use bankagg_core::{Role, TransactionRecord};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::warn;

/// Well-known session keys.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const ROLE: &str = "role";
    pub const USER_ID: &str = "userId";
    pub const CUSTOMER_ID: &str = "customerId";
    /// The resolved account id cache. No expiry; cleared only by logout.
    pub const ACCOUNT_ID: &str = "accountId";
    /// JSON-serialized last-known transaction snapshot.
    pub const TRANSACTIONS: &str = "transactions";
}

/// Shared mutable session state with typed accessors.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from its JSON export (the CLI session file).
    ///
    /// Unreadable state means a fresh session rather than an error; the
    /// user just has to log in again.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HashMap<String, String>>(json) {
            Ok(entries) => Self {
                entries: RwLock::new(entries),
            },
            Err(err) => {
                warn!(%err, "Discarding unreadable session state");
                Self::new()
            }
        }
    }

    /// Export for the CLI session file.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&*self.entries.read()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.entries.write().insert(key.to_string(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Full clear: logout semantics.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn token(&self) -> Option<String> {
        self.get(keys::TOKEN)
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.set(keys::TOKEN, token);
    }

    pub fn role(&self) -> Role {
        self.get(keys::ROLE)
            .map(|r| Role::parse(&r))
            .unwrap_or_default()
    }

    pub fn set_role(&self, role: Role) {
        self.set(keys::ROLE, role.as_str());
    }

    pub fn user_id(&self) -> Option<String> {
        self.get(keys::USER_ID)
    }

    pub fn set_user_id(&self, id: impl Into<String>) {
        self.set(keys::USER_ID, id);
    }

    pub fn customer_id(&self) -> Option<String> {
        self.get(keys::CUSTOMER_ID)
    }

    pub fn set_customer_id(&self, id: impl Into<String>) {
        self.set(keys::CUSTOMER_ID, id);
    }

    /// The resolved account id, if any resolution has succeeded before.
    pub fn account_id(&self) -> Option<String> {
        self.get(keys::ACCOUNT_ID)
    }

    pub fn set_account_id(&self, id: impl Into<String>) {
        self.set(keys::ACCOUNT_ID, id);
    }

    /// Last successful transaction fetch, used when every endpoint guess
    /// fails on a later load.
    pub fn transaction_snapshot(&self) -> Vec<TransactionRecord> {
        let Some(json) = self.get(keys::TRANSACTIONS) else {
            return Vec::new();
        };
        match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "Discarding unreadable transaction snapshot");
                Vec::new()
            }
        }
    }

    /// Overwrite the snapshot with the latest fetch. No merging.
    pub fn set_transaction_snapshot(&self, records: &[TransactionRecord]) {
        if let Ok(json) = serde_json::to_string(records) {
            self.set(keys::TRANSACTIONS, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankagg_core::TransactionRecord;
    use rust_decimal_macros::dec;

    fn sample_transaction() -> TransactionRecord {
        TransactionRecord {
            id: "31".to_string(),
            date: "2024-03-01".to_string(),
            kind: "Deposit".to_string(),
            amount: dec!(10),
            description: "salary".to_string(),
            account_id: "9".to_string(),
        }
    }

    #[test]
    fn test_typed_accessors() {
        let store = SessionStore::new();
        store.set_token("abc");
        store.set_role(Role::Admin);
        store.set_user_id("5");
        store.set_customer_id("109");
        store.set_account_id("9999");

        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.role(), Role::Admin);
        assert_eq!(store.user_id().as_deref(), Some("5"));
        assert_eq!(store.customer_id().as_deref(), Some("109"));
        assert_eq!(store.account_id().as_deref(), Some("9999"));
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let store = SessionStore::new();
        assert_eq!(store.role(), Role::Customer);
    }

    #[test]
    fn test_clear_drops_everything() {
        let store = SessionStore::new();
        store.set_token("abc");
        store.set_account_id("9999");
        store.set_transaction_snapshot(&[sample_transaction()]);

        store.clear();

        assert!(store.token().is_none());
        assert!(store.account_id().is_none());
        assert!(store.transaction_snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_overwrites_previous() {
        let store = SessionStore::new();
        store.set_transaction_snapshot(&[sample_transaction(), sample_transaction()]);
        store.set_transaction_snapshot(&[sample_transaction()]);
        assert_eq!(store.transaction_snapshot().len(), 1);
    }

    #[test]
    fn test_unreadable_state_starts_fresh() {
        let store = SessionStore::from_json("not json");
        assert!(store.token().is_none());

        let store = SessionStore::new();
        store.set(keys::TRANSACTIONS, "{broken");
        assert!(store.transaction_snapshot().is_empty());
    }

    #[test]
    fn test_json_export_import() {
        let store = SessionStore::new();
        store.set_token("abc");
        store.set_user_id("5");

        let restored = SessionStore::from_json(&store.to_json());
        assert_eq!(restored.token().as_deref(), Some("abc"));
        assert_eq!(restored.user_id().as_deref(), Some("5"));
    }
}
