//! FreezeGuard Core - Domain types
//!
//! This crate contains the fundamental types shared by the registry and
//! the rule crates:
//! - `Address`: Validated account/contract address
//! - `UserId`: Per-intermediary user identifier
//! - `AttributeKey`: Integer code of a user attribute

pub mod address;
pub mod identity;

pub use address::{Address, AddressError};
pub use identity::{AttributeKey, AttributeValue, Timestamp, UserId};
