//! Registry snapshots - JSON import/export
//!
//! Used to seed a registry from a file (CLI, fixtures) and to dump the
//! current state for inspection.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use freezeguard_core::{Address, AttributeKey, AttributeValue, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::registry::{ComplianceRegistry, Namespace, UserRecord};

/// Serializable view of a whole registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// One user in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub trusted_intermediary: Address,
    pub user_id: UserId,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl RegistrySnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write the snapshot as pretty JSON
    pub fn to_file(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

impl ComplianceRegistry {
    /// Export every user, ordered by intermediary then user id
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut intermediaries: Vec<&Address> = self.namespaces.keys().collect();
        intermediaries.sort();

        let users = intermediaries
            .into_iter()
            .flat_map(|intermediary| {
                self.namespaces[intermediary]
                    .users
                    .values()
                    .map(move |record| UserEntry {
                        trusted_intermediary: intermediary.clone(),
                        user_id: record.user_id,
                        addresses: record.addresses.iter().cloned().collect(),
                        attributes: record.attributes.clone(),
                    })
            })
            .collect();

        RegistrySnapshot { users }
    }

    /// Rebuild a registry from a snapshot
    ///
    /// Id allocation resumes after the highest id seen per intermediary.
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> RegistryResult<Self> {
        let mut registry = ComplianceRegistry::new();

        for entry in &snapshot.users {
            let namespace: &mut Namespace = registry
                .namespaces
                .entry(entry.trusted_intermediary.clone())
                .or_default();

            if entry.user_id.value() == 0 {
                return Err(RegistryError::InvalidSnapshot(format!(
                    "user id 0 under {}",
                    entry.trusted_intermediary
                )));
            }

            if namespace.users.contains_key(&entry.user_id) {
                return Err(RegistryError::InvalidSnapshot(format!(
                    "duplicate user {} under {}",
                    entry.user_id, entry.trusted_intermediary
                )));
            }

            let mut addresses = BTreeSet::new();
            for address in &entry.addresses {
                if namespace.address_users.contains_key(address) || !addresses.insert(address.clone()) {
                    return Err(RegistryError::AddressAlreadyAttached(address.clone()));
                }
                namespace.address_users.insert(address.clone(), entry.user_id);
            }

            namespace.last_user_id = namespace.last_user_id.max(entry.user_id.value());
            namespace.users.insert(
                entry.user_id,
                UserRecord {
                    user_id: entry.user_id,
                    addresses,
                    attributes: entry.attributes.clone(),
                },
            );
        }

        tracing::debug!(users = snapshot.users.len(), "Registry restored from snapshot");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryQuery, UserRef};
    use tempfile::TempDir;

    fn addr(s: &str) -> Address {
        Address::new(s).unwrap()
    }

    fn sample_registry() -> ComplianceRegistry {
        let mut registry = ComplianceRegistry::new();
        let ti = addr("ti1");
        let id = registry
            .register_user(&ti, &addr("alice"), &[AttributeKey::FREEZE_DIRECTION], &[2])
            .unwrap();
        registry.attach_address(&ti, id, &addr("alice-2")).unwrap();
        registry.register_user(&ti, &addr("bob"), &[], &[]).unwrap();
        registry.register_user(&addr("ti2"), &addr("carol"), &[], &[]).unwrap();
        registry
    }

    #[test]
    fn test_snapshot_restores_lookups() {
        let registry = sample_registry();
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.users.len(), 3);

        let restored = ComplianceRegistry::from_snapshot(&snapshot).unwrap();
        let user = restored.user_id(&[addr("ti1")], &addr("alice-2")).unwrap();

        assert_eq!(user, UserRef::new(addr("ti1"), UserId(1)));
        assert_eq!(restored.attribute(&user, AttributeKey::FREEZE_DIRECTION), Some(2));
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_restored_registry_continues_id_sequence() {
        let snapshot = sample_registry().snapshot();
        let mut restored = ComplianceRegistry::from_snapshot(&snapshot).unwrap();

        let next = restored.register_user(&addr("ti1"), &addr("dave"), &[], &[]).unwrap();
        assert_eq!(next, UserId(3));
    }

    #[test]
    fn test_snapshot_rejects_shared_address() {
        let json = r#"{
            "users": [
                { "trusted_intermediary": "ti1", "user_id": 1, "addresses": ["alice"] },
                { "trusted_intermediary": "ti1", "user_id": 2, "addresses": ["alice"] }
            ]
        }"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).unwrap();

        let err = ComplianceRegistry::from_snapshot(&snapshot).unwrap_err();
        assert_eq!(err, RegistryError::AddressAlreadyAttached(addr("alice")));
    }

    #[test]
    fn test_snapshot_rejects_duplicate_user() {
        let json = r#"{
            "users": [
                { "trusted_intermediary": "ti1", "user_id": 1 },
                { "trusted_intermediary": "ti1", "user_id": 1 }
            ]
        }"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).unwrap();

        let err = ComplianceRegistry::from_snapshot(&snapshot).unwrap_err();
        assert_eq!(err.code(), "UR04");
    }

    #[test]
    fn test_snapshot_attribute_keys_in_json() {
        let json = r#"{
            "users": [
                {
                    "trusted_intermediary": "ti1",
                    "user_id": 1,
                    "addresses": ["alice"],
                    "attributes": { "120": 3, "121": 1000, "122": 2000, "123": 0 }
                }
            ]
        }"#;
        let snapshot: RegistrySnapshot = serde_json::from_str(json).unwrap();
        let registry = ComplianceRegistry::from_snapshot(&snapshot).unwrap();

        let user = registry.user_id(&[addr("ti1")], &addr("alice")).unwrap();
        assert_eq!(registry.attribute(&user, AttributeKey::FREEZE_END), Some(2000));
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.json");

        let snapshot = sample_registry().snapshot();
        snapshot.to_file(&path).unwrap();

        let loaded = RegistrySnapshot::from_file(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }
}
