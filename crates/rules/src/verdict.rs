//! Verdicts reported by rules

use serde::{Deserialize, Serialize};

/// No restriction
pub const REASON_OK: u32 = 0;
/// A rule failed or never reported (set by the engine, never by rules)
pub const REASON_RULE_FAILURE: u32 = 1;
/// Sender is unknown or frozen for sending
pub const REASON_SENDER_RESTRICTED: u32 = 2;
/// Receiver is unknown or frozen for receiving
pub const REASON_RECEIVER_RESTRICTED: u32 = 3;

/// Outcome of a single rule check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub reason: u32,
}

impl Verdict {
    /// Transfer allowed
    pub const fn approved() -> Self {
        Self {
            valid: true,
            reason: REASON_OK,
        }
    }

    /// Transfer refused with a reason code
    pub const fn rejected(reason: u32) -> Self {
        Self {
            valid: false,
            reason,
        }
    }

    /// Check if the transfer is allowed
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict::approved()
    }
}
