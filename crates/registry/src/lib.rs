//! FreezeGuard Compliance Registry
//!
//! Identity store consulted by transfer rules.
//!
//! ## Namespaces
//!
//! ```text
//! Trusted Intermediary A            Trusted Intermediary B
//! ├── user 1 ── [addr1, addr3]      ├── user 1 ── [addr2]
//! │   └── {120: 2, 121: .., ..}     │   └── {0: 1874872800}
//! └── user 2 ── [addr4]             └── ...
//! ```
//!
//! Every intermediary owns its own user ids and attributes. A token
//! declares which intermediaries it trusts; lookups walk that list in
//! order and the first binding wins.
//!
//! ## Key Components
//!
//! - [`registry::RegistryQuery`] - Read interface used by rules
//! - [`registry::ComplianceRegistry`] - In-memory store with intermediary-scoped writes
//! - [`snapshot::RegistrySnapshot`] - JSON import/export of the whole store

pub mod error;
pub mod registry;
pub mod snapshot;

pub use error::{RegistryError, RegistryResult};
pub use registry::{ComplianceRegistry, RegistryQuery, UserRecord, UserRef};
pub use snapshot::{RegistrySnapshot, UserEntry};
