//! Compliance Registry - address → user → attributes
//!
//! Reads go through [`RegistryQuery`] so rules never depend on the
//! concrete store. Writes are scoped to the calling trusted intermediary:
//! an intermediary can only touch users it registered itself.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use freezeguard_core::{Address, AttributeKey, AttributeValue, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// A user resolved through a specific trusted intermediary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    /// Intermediary that registered the user
    pub trusted_intermediary: Address,
    /// Id inside that intermediary's namespace
    pub user_id: UserId,
}

impl UserRef {
    pub fn new(trusted_intermediary: Address, user_id: UserId) -> Self {
        Self {
            trusted_intermediary,
            user_id,
        }
    }
}

/// Read interface consumed by transfer rules
///
/// Implementations must be side-effect free.
pub trait RegistryQuery {
    /// Resolve an address through the given intermediaries, in order
    ///
    /// Returns `None` when no listed intermediary has the address bound.
    fn user_id(&self, trusted_intermediaries: &[Address], address: &Address) -> Option<UserRef>;

    /// Read a single attribute of a resolved user
    fn attribute(&self, user: &UserRef, key: AttributeKey) -> Option<AttributeValue>;

    /// Read several attributes at once, preserving key order
    fn attributes(&self, user: &UserRef, keys: &[AttributeKey]) -> Vec<Option<AttributeValue>> {
        keys.iter().map(|key| self.attribute(user, *key)).collect()
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    /// Addresses bound to this user
    pub addresses: BTreeSet<Address>,
    /// Attribute values, one per key
    pub attributes: BTreeMap<AttributeKey, AttributeValue>,
}

impl UserRecord {
    fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            addresses: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Everything one trusted intermediary has registered
#[derive(Debug, Default, Clone)]
pub(crate) struct Namespace {
    /// Highest user id allocated so far (0 = none)
    pub(crate) last_user_id: u64,
    pub(crate) address_users: HashMap<Address, UserId>,
    pub(crate) users: BTreeMap<UserId, UserRecord>,
}

impl Namespace {
    fn user_mut(
        &mut self,
        intermediary: &Address,
        user_id: UserId,
    ) -> RegistryResult<&mut UserRecord> {
        self.users
            .get_mut(&user_id)
            .ok_or_else(|| RegistryError::UserNotFound {
                trusted_intermediary: intermediary.clone(),
                user_id,
            })
    }

    fn allocate(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId(self.last_user_id)
    }
}

/// In-memory Compliance Registry
#[derive(Debug, Default, Clone)]
pub struct ComplianceRegistry {
    pub(crate) namespaces: HashMap<Address, Namespace>,
}

fn check_lengths(keys: &[AttributeKey], values: &[AttributeValue]) -> RegistryResult<()> {
    if keys.len() != values.len() {
        return Err(RegistryError::AttributeLengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }
    Ok(())
}

impl ComplianceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user bound to `address`
    ///
    /// The user id is the next free id in the intermediary's namespace.
    pub fn register_user(
        &mut self,
        intermediary: &Address,
        address: &Address,
        keys: &[AttributeKey],
        values: &[AttributeValue],
    ) -> RegistryResult<UserId> {
        let ids = self.register_users(intermediary, std::slice::from_ref(address), keys, values)?;
        Ok(ids[0])
    }

    /// Register one user per address, all with the same attributes
    ///
    /// Nothing is written unless every address is free.
    pub fn register_users(
        &mut self,
        intermediary: &Address,
        addresses: &[Address],
        keys: &[AttributeKey],
        values: &[AttributeValue],
    ) -> RegistryResult<Vec<UserId>> {
        check_lengths(keys, values)?;

        let namespace = self.namespaces.entry(intermediary.clone()).or_default();

        let mut seen = BTreeSet::new();
        for address in addresses {
            if namespace.address_users.contains_key(address) || !seen.insert(address) {
                return Err(RegistryError::AddressAlreadyAttached(address.clone()));
            }
        }

        let mut ids = Vec::with_capacity(addresses.len());
        for address in addresses {
            let user_id = namespace.allocate();
            let mut record = UserRecord::new(user_id);
            record.addresses.insert(address.clone());
            record
                .attributes
                .extend(keys.iter().copied().zip(values.iter().copied()));

            namespace.address_users.insert(address.clone(), user_id);
            namespace.users.insert(user_id, record);

            tracing::info!(
                trusted_intermediary = %intermediary,
                user_id = %user_id,
                address = %address,
                "User registered"
            );
            ids.push(user_id);
        }

        Ok(ids)
    }

    /// Bind another address to an existing user
    pub fn attach_address(
        &mut self,
        intermediary: &Address,
        user_id: UserId,
        address: &Address,
    ) -> RegistryResult<()> {
        let namespace = self.namespaces.entry(intermediary.clone()).or_default();

        if namespace.address_users.contains_key(address) {
            return Err(RegistryError::AddressAlreadyAttached(address.clone()));
        }

        namespace
            .user_mut(intermediary, user_id)?
            .addresses
            .insert(address.clone());
        namespace.address_users.insert(address.clone(), user_id);

        tracing::info!(
            trusted_intermediary = %intermediary,
            user_id = %user_id,
            address = %address,
            "Address attached"
        );
        Ok(())
    }

    /// Unbind an address from its user
    ///
    /// The user record itself is kept, even with no address left.
    pub fn detach_address(&mut self, intermediary: &Address, address: &Address) -> RegistryResult<()> {
        let namespace = self
            .namespaces
            .get_mut(intermediary)
            .ok_or_else(|| RegistryError::AddressNotAttached(address.clone()))?;

        let user_id = namespace
            .address_users
            .remove(address)
            .ok_or_else(|| RegistryError::AddressNotAttached(address.clone()))?;

        if let Some(record) = namespace.users.get_mut(&user_id) {
            record.addresses.remove(address);
        }

        tracing::info!(
            trusted_intermediary = %intermediary,
            user_id = %user_id,
            address = %address,
            "Address detached"
        );
        Ok(())
    }

    /// Set attributes on an existing user (last write wins per key)
    pub fn update_user_attributes(
        &mut self,
        intermediary: &Address,
        user_id: UserId,
        keys: &[AttributeKey],
        values: &[AttributeValue],
    ) -> RegistryResult<()> {
        check_lengths(keys, values)?;

        let namespace = self.namespaces.entry(intermediary.clone()).or_default();
        let record = namespace.user_mut(intermediary, user_id)?;
        record
            .attributes
            .extend(keys.iter().copied().zip(values.iter().copied()));

        tracing::info!(
            trusted_intermediary = %intermediary,
            user_id = %user_id,
            keys = ?keys,
            "User attributes updated"
        );
        Ok(())
    }

    /// Look up a full user record
    pub fn user(&self, user: &UserRef) -> Option<&UserRecord> {
        self.namespaces
            .get(&user.trusted_intermediary)
            .and_then(|ns| ns.users.get(&user.user_id))
    }

    /// Addresses bound to a user (empty when unknown)
    pub fn addresses_of(&self, user: &UserRef) -> Vec<Address> {
        self.user(user)
            .map(|record| record.addresses.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of users registered by an intermediary
    pub fn user_count(&self, intermediary: &Address) -> usize {
        self.namespaces
            .get(intermediary)
            .map(|ns| ns.users.len())
            .unwrap_or(0)
    }
}

impl RegistryQuery for ComplianceRegistry {
    fn user_id(&self, trusted_intermediaries: &[Address], address: &Address) -> Option<UserRef> {
        trusted_intermediaries.iter().find_map(|intermediary| {
            self.namespaces
                .get(intermediary)
                .and_then(|ns| ns.address_users.get(address))
                .map(|user_id| UserRef::new(intermediary.clone(), *user_id))
        })
    }

    fn attribute(&self, user: &UserRef, key: AttributeKey) -> Option<AttributeValue> {
        self.user(user)
            .and_then(|record| record.attributes.get(&key))
            .copied()
    }
}
