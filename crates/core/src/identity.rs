//! User identity primitives

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch
pub type Timestamp = i64;

/// Raw attribute value (flags, codes and timestamps are all integers)
pub type AttributeValue = i64;

/// User identifier, unique inside one trusted intermediary's namespace
///
/// Ids are allocated sequentially starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// First id handed out by a fresh namespace
    pub const FIRST: UserId = UserId(1);

    /// Get the inner value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id allocated after this one
    #[inline]
    pub const fn next(&self) -> UserId {
        UserId(self.0 + 1)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(v: u64) -> Self {
        UserId(v)
    }
}

/// Integer code identifying a user attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub u32);

impl AttributeKey {
    /// Timestamp until which the user registration is valid
    pub const VALID_UNTIL: AttributeKey = AttributeKey(0);
    /// 0 = not frozen, 1 = receive, 2 = send, 3 = both
    pub const FREEZE_DIRECTION: AttributeKey = AttributeKey(120);
    /// Freeze window start (seconds since epoch)
    pub const FREEZE_START: AttributeKey = AttributeKey(121);
    /// Freeze window end (seconds since epoch)
    pub const FREEZE_END: AttributeKey = AttributeKey(122);
    /// 0 = frozen inside the window, 1 = frozen outside of it
    pub const FREEZE_INVERTED: AttributeKey = AttributeKey(123);

    /// Get the inner value
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AttributeKey {
    fn from(v: u32) -> Self {
        AttributeKey(v)
    }
}
