//! Participant identities and the registry that issues them
//!
//! Keys are opaque handles minted at registration. They carry entropy and
//! an issue time but no cryptographic material: possession of a key is the
//! whole trust model, which is enforced by the caller, not the registry.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Key of the built-in identity that issues the genesis block
pub const SYSTEM_KEY: &str = "SYSTEM";

/// A participant known to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque registry handle, unique per registration
    pub key: String,
    /// Display name, not necessarily unique
    pub name: String,
    /// Epoch milliseconds at registration
    pub issued_at: i64,
}

impl Identity {
    /// The built-in identity that issues the genesis block.
    ///
    /// Never present in a registry; only `register` produces entries.
    pub fn system() -> Self {
        Identity {
            key: SYSTEM_KEY.to_string(),
            name: SYSTEM_KEY.to_string(),
            issued_at: 0,
        }
    }
}

/// Issues identities and answers membership queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRegistry {
    identities: HashMap<String, Identity>,
}

impl IdentityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        IdentityRegistry {
            identities: HashMap::new(),
        }
    }

    /// Register a participant under a freshly minted key.
    ///
    /// Keys embed the name, a random component and the issue time. On the
    /// astronomically unlikely collision a fresh key is drawn, so every
    /// registration yields a distinct entry and the call always succeeds.
    pub fn register(&mut self, name: &str) -> Identity {
        let mut key = mint_key(name);
        while self.identities.contains_key(&key) {
            key = mint_key(name);
        }

        let identity = Identity {
            key: key.clone(),
            name: name.to_string(),
            issued_at: chrono::Utc::now().timestamp_millis(),
        };
        debug!(key = %identity.key, "registered identity");
        self.identities.insert(key, identity.clone());
        identity
    }

    /// Whether a key belongs to a registered identity
    pub fn verify(&self, key: &str) -> bool {
        self.identities.contains_key(key)
    }

    /// Look up a registered identity by key
    pub fn lookup(&self, key: &str) -> Option<&Identity> {
        self.identities.get(key)
    }

    /// Number of registered identities
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether no identity has been registered yet
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// All registered identities, in no particular order
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.values()
    }
}

fn mint_key(name: &str) -> String {
    let entropy: u64 = rand::thread_rng().gen();
    let time_component = chrono::Utc::now().timestamp_micros();
    format!("{}-{:x}-{:x}", name, entropy, time_component)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = IdentityRegistry::new();
        let alice = registry.register("alice");

        assert!(alice.key.starts_with("alice-"));
        assert!(alice.issued_at > 0);
        assert!(registry.verify(&alice.key));

        let found = registry.lookup(&alice.key).unwrap();
        assert_eq!(found.name, "alice");
        assert_eq!(found, &alice);
    }

    #[test]
    fn unknown_key_is_absent() {
        let registry = IdentityRegistry::new();
        assert!(!registry.verify("alice-0-0"));
        assert!(registry.lookup("alice-0-0").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn same_name_registers_distinct_identities() {
        let mut registry = IdentityRegistry::new();
        let first = registry.register("alice");
        let second = registry.register("alice");

        assert_ne!(first.key, second.key);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn system_identity_is_not_registered() {
        let registry = IdentityRegistry::new();
        assert!(!registry.verify(SYSTEM_KEY));
        assert_eq!(Identity::system().name, SYSTEM_KEY);
        assert_eq!(Identity::system().issued_at, 0);
    }

    #[test]
    fn identities_iterates_every_entry() {
        let mut registry = IdentityRegistry::new();
        registry.register("alice");
        registry.register("bob");

        let names: Vec<&str> = registry.identities().map(|id| id.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"alice"));
        assert!(names.contains(&"bob"));
    }
}
