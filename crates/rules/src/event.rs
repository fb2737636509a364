//! Rule events (written to the Verdict Ledger)

use chrono::{DateTime, Utc};
use freezeguard_core::Address;
use serde::{Deserialize, Serialize};

use crate::engine::EngineVerdict;
use crate::request::TransferRequest;

/// Events appended to the Verdict Ledger (append-only JSONL)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RuleEvent {
    /// A transfer went through the rule chain
    TransferChecked {
        id: String,
        token: Option<Address>,
        from: Address,
        to: Address,
        valid: bool,
        rule_index: Option<usize>,
        reason: u32,
        timestamp: DateTime<Utc>,
    },

    /// A rule refused an after-transfer hook call
    HookRejected {
        id: String,
        rule: String,
        token: Option<Address>,
        from: Address,
        to: Address,
        error: String,
        code: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl RuleEvent {
    /// Create a TransferChecked event
    pub fn transfer_checked(request: &TransferRequest, verdict: &EngineVerdict) -> Self {
        RuleEvent::TransferChecked {
            id: uuid::Uuid::new_v4().to_string(),
            token: request.token.clone(),
            from: request.from.clone(),
            to: request.to.clone(),
            valid: verdict.valid,
            rule_index: verdict.rule_index,
            reason: verdict.reason,
            timestamp: Utc::now(),
        }
    }

    /// Create a HookRejected event
    pub fn hook_rejected(
        rule: &str,
        request: &TransferRequest,
        error: impl Into<String>,
        code: Option<&str>,
    ) -> Self {
        RuleEvent::HookRejected {
            id: uuid::Uuid::new_v4().to_string(),
            rule: rule.to_string(),
            token: request.token.clone(),
            from: request.from.clone(),
            to: request.to.clone(),
            error: error.into(),
            code: code.map(str::to_string),
            timestamp: Utc::now(),
        }
    }

    /// Event id
    pub fn id(&self) -> &str {
        match self {
            RuleEvent::TransferChecked { id, .. } | RuleEvent::HookRejected { id, .. } => id,
        }
    }
}
