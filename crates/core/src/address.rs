//! Address - Validated account identifiers
//!
//! Addresses are opaque to FreezeGuard: a wallet key hash, a contract
//! address or any other stable account string. They are only checked
//! for shape, never decoded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted address length
pub const MAX_ADDRESS_LEN: usize = 128;

/// Errors that can occur when parsing addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty address")]
    Empty,

    #[error("Address too long (max {MAX_ADDRESS_LEN} chars): {0}")]
    TooLong(String),

    #[error("Address contains whitespace or control characters: {0:?}")]
    InvalidFormat(String),
}

/// Account address
///
/// Case-sensitive; surrounding whitespace is trimmed when parsing.
///
/// # Examples
/// ```
/// use freezeguard_core::Address;
///
/// let alice: Address = "tz1alice".parse().unwrap();
/// assert_eq!(alice.as_str(), "tz1alice");
///
/// assert!("".parse::<Address>().is_err());
/// assert!("tz1 alice".parse::<Address>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address
    pub fn new(value: impl AsRef<str>) -> Result<Self, AddressError> {
        value.as_ref().parse()
    }

    /// Returns the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        if s.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::TooLong(s.to_string()));
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AddressError::InvalidFormat(s.to_string()));
        }

        Ok(Address(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let addr: Address = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb".parse().unwrap();
        assert_eq!(addr.as_str(), "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb");
        assert_eq!(addr.to_string(), "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let addr: Address = "  KT1token  ".parse().unwrap();
        assert_eq!(addr.as_str(), "KT1token");
    }

    #[test]
    fn test_address_is_case_sensitive() {
        let lower: Address = "tz1abc".parse().unwrap();
        let upper: Address = "TZ1ABC".parse().unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Address>(), Err(AddressError::Empty));
        assert_eq!("   ".parse::<Address>(), Err(AddressError::Empty));
        assert!(matches!(
            "tz1 abc".parse::<Address>(),
            Err(AddressError::InvalidFormat(_))
        ));

        let long = "a".repeat(MAX_ADDRESS_LEN + 1);
        assert!(matches!(long.parse::<Address>(), Err(AddressError::TooLong(_))));
    }

    #[test]
    fn test_serde_round_trip_rejects_invalid() {
        let addr = Address::new("tz1alice").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"tz1alice\"");

        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);

        assert!(serde_json::from_str::<Address>("\"\"").is_err());
    }
}
