//! Rule engine configuration
//!
//! Loaded from a JSON file; every field has a default so partial files
//! are accepted.

use std::path::PathBuf;

use freezeguard_core::Address;
use serde::{Deserialize, Serialize};

/// Configuration for the Rule Engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Intermediaries trusted by the token, in lookup order
    #[serde(default)]
    pub trusted_intermediaries: Vec<Address>,

    /// Treat unregistered parties as unrestricted
    #[serde(default)]
    pub allow_not_found: bool,

    /// Policy when a rule fails to produce a verdict
    #[serde(default)]
    pub fail_policy: FailPolicy,

    /// Verdict ledger file (JSONL); in-memory when unset
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

/// Policy when a rule errors or never reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailPolicy {
    /// Reject the transfer
    #[default]
    FailClosed,

    /// Skip the failing rule
    FailOpen,
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
