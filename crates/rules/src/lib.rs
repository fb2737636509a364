//! FreezeGuard Rules - Transfer validation
//!
//! A transfer is checked by a chain of rules, each reporting a verdict
//! to a result sink:
//!
//! ```text
//! TransferRequest
//!     │
//!     ▼
//! ┌─────────────────────────────┐
//! │ RuleEngine                  │
//! │  ├── rule 0 ──► sink        │ ← first invalid verdict stops the chain
//! │  ├── rule 1 ──► sink        │
//! │  └── ...                    │
//! └─────────────────────────────┘
//!     │
//!     ▼
//! EngineVerdict ──► VerdictLedger (JSONL)
//! ```
//!
//! ## Key Components
//!
//! - [`traits::Rule`] - Capability implemented by every rule
//! - [`freeze_rule::UserFreezeRule`] - Time-windowed send/receive freezes
//! - [`sink::ResultSink`] - Where rules report their verdict
//! - [`clock::Clock`] - Time source sampled once per check
//! - [`engine::RuleEngine`] - Ordered rule chain with fail policy
//! - [`ledger::VerdictLedger`] - Append-only record of checks

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod freeze;
pub mod freeze_rule;
pub mod ledger;
pub mod request;
pub mod sink;
pub mod traits;
pub mod verdict;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, FailPolicy};
pub use engine::{EngineVerdict, RuleEngine};
pub use error::{RuleError, RuleResult};
pub use event::RuleEvent;
pub use freeze::{FreezeDirection, FreezeProfile, FreezeWindow, TransferSide, WindowMode};
pub use freeze_rule::UserFreezeRule;
pub use ledger::VerdictLedger;
pub use request::TransferRequest;
pub use sink::{ResultSink, VerdictRecorder};
pub use traits::Rule;
pub use verdict::{
    Verdict, REASON_OK, REASON_RECEIVER_RESTRICTED, REASON_RULE_FAILURE, REASON_SENDER_RESTRICTED,
};
