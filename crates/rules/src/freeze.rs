//! Freeze attributes decoded from the registry
//!
//! A user is frozen on one side of a transfer when their freeze
//! direction covers that side and the freeze window is active at the
//! evaluation instant.
//!
//! Window semantics (`start <= end` in practice, but not required):
//! - `Normal`: active while `start <= now <= end`
//! - `Inverted`: active while `now < start || now > end`
//!
//! Both bounds are inclusive for the normal window, so the inverted
//! window is its exact complement.

use freezeguard_core::{AttributeKey, AttributeValue, Timestamp};
use freezeguard_registry::{RegistryQuery, UserRef};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which side of a transfer a party is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransferSide {
    /// Party is sending funds
    Send,
    /// Party is receiving funds
    Receive,
}

/// Freeze direction stored under `FREEZE_DIRECTION`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FreezeDirection {
    /// Code 0 (also used for absent or unknown codes)
    #[default]
    NotFrozen,
    /// Code 1
    Receive,
    /// Code 2
    Send,
    /// Code 3
    Both,
}

impl FreezeDirection {
    /// Decode the integer attribute
    pub fn from_code(code: AttributeValue) -> Self {
        match code {
            1 => FreezeDirection::Receive,
            2 => FreezeDirection::Send,
            3 => FreezeDirection::Both,
            _ => FreezeDirection::NotFrozen,
        }
    }

    /// Integer attribute value
    pub fn code(&self) -> AttributeValue {
        match self {
            FreezeDirection::NotFrozen => 0,
            FreezeDirection::Receive => 1,
            FreezeDirection::Send => 2,
            FreezeDirection::Both => 3,
        }
    }

    /// Whether this direction restricts the given side
    pub fn blocks(&self, side: TransferSide) -> bool {
        matches!(
            (self, side),
            (FreezeDirection::Both, _)
                | (FreezeDirection::Send, TransferSide::Send)
                | (FreezeDirection::Receive, TransferSide::Receive)
        )
    }
}

/// How the window bounds are interpreted
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Frozen inside the window
    #[default]
    Normal,
    /// Frozen outside the window
    Inverted,
}

impl WindowMode {
    /// Decode the `FREEZE_INVERTED` flag (any non-zero value inverts)
    pub fn from_flag(flag: AttributeValue) -> Self {
        if flag == 0 {
            WindowMode::Normal
        } else {
            WindowMode::Inverted
        }
    }
}

/// Freeze time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
    pub mode: WindowMode,
}

impl FreezeWindow {
    pub fn new(start: Timestamp, end: Timestamp, mode: WindowMode) -> Self {
        Self { start, end, mode }
    }

    /// `start <= now <= end`
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start <= now && now <= self.end
    }

    /// Whether the freeze applies at `now`
    pub fn is_active(&self, now: Timestamp) -> bool {
        match self.mode {
            WindowMode::Normal => self.contains(now),
            WindowMode::Inverted => !self.contains(now),
        }
    }
}

/// Decoded freeze attributes of one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeProfile {
    pub direction: FreezeDirection,
    pub window: FreezeWindow,
}

const FREEZE_KEYS: [AttributeKey; 4] = [
    AttributeKey::FREEZE_DIRECTION,
    AttributeKey::FREEZE_START,
    AttributeKey::FREEZE_END,
    AttributeKey::FREEZE_INVERTED,
];

impl FreezeProfile {
    /// Read the four freeze attributes of a user; absent values read as 0
    pub fn read(registry: &dyn RegistryQuery, user: &UserRef) -> Self {
        let values: Vec<AttributeValue> = registry
            .attributes(user, &FREEZE_KEYS)
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        Self::from_values(values[0], values[1], values[2], values[3])
    }

    /// Build from raw attribute values
    pub fn from_values(
        direction: AttributeValue,
        start: AttributeValue,
        end: AttributeValue,
        inverted: AttributeValue,
    ) -> Self {
        Self {
            direction: FreezeDirection::from_code(direction),
            window: FreezeWindow::new(start, end, WindowMode::from_flag(inverted)),
        }
    }

    /// Whether the user may not act on `side` at `now`
    pub fn is_frozen(&self, side: TransferSide, now: Timestamp) -> bool {
        self.direction.blocks(side) && self.window.is_active(now)
    }
}
