//! Rule Engine - runs a token's rules in order
//!
//! The first rule reporting an invalid verdict decides the outcome; its
//! position and reason are returned so callers know which rule refused.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, FailPolicy};
use crate::error::{RuleError, RuleResult};
use crate::event::RuleEvent;
use crate::ledger::VerdictLedger;
use crate::request::TransferRequest;
use crate::sink::VerdictRecorder;
use crate::traits::Rule;
use crate::verdict::{Verdict, REASON_OK, REASON_RULE_FAILURE};

/// Aggregated outcome of a rule chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineVerdict {
    pub valid: bool,
    /// Position of the refusing rule (`None` when approved)
    pub rule_index: Option<usize>,
    pub reason: u32,
}

impl EngineVerdict {
    /// Every rule approved
    pub fn approved() -> Self {
        Self {
            valid: true,
            rule_index: None,
            reason: REASON_OK,
        }
    }

    /// Refused by the rule at `rule_index`
    pub fn rejected(rule_index: usize, reason: u32) -> Self {
        Self {
            valid: false,
            rule_index: Some(rule_index),
            reason,
        }
    }

    /// Reason-level view without the rule position
    pub fn verdict(&self) -> Verdict {
        Verdict {
            valid: self.valid,
            reason: self.reason,
        }
    }
}

/// Ordered rule chain with a verdict ledger
pub struct RuleEngine {
    rules: Vec<Arc<dyn Rule>>,
    fail_policy: FailPolicy,
    ledger: VerdictLedger,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Create an engine with no rules and a non-recording in-memory ledger
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fail_policy: FailPolicy::FailClosed,
            ledger: VerdictLedger::in_memory(),
        }
    }

    /// Create an engine from configuration (opens the ledger file if set)
    pub fn from_config(config: &EngineConfig) -> RuleResult<Self> {
        let ledger = match &config.ledger_path {
            Some(path) => VerdictLedger::new(path)?,
            None => VerdictLedger::in_memory(),
        };

        Ok(Self::new()
            .with_fail_policy(config.fail_policy)
            .with_ledger(ledger))
    }

    /// Set the fail policy
    pub fn with_fail_policy(mut self, policy: FailPolicy) -> Self {
        self.fail_policy = policy;
        self
    }

    /// Set the verdict ledger
    pub fn with_ledger(mut self, ledger: VerdictLedger) -> Self {
        self.ledger = ledger;
        self
    }

    /// Append a rule to the chain
    pub fn register_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Run every rule until one refuses, then record the outcome
    pub fn validate(&mut self, request: &TransferRequest) -> RuleResult<EngineVerdict> {
        let verdict = self.run_rules(request);
        self.ledger
            .append(&RuleEvent::transfer_checked(request, &verdict))?;
        Ok(verdict)
    }

    fn run_rules(&self, request: &TransferRequest) -> EngineVerdict {
        for (index, rule) in self.rules.iter().enumerate() {
            let recorder = VerdictRecorder::new();
            let outcome = rule.is_transfer_valid(request, &recorder).and_then(|()| {
                recorder
                    .last()
                    .ok_or_else(|| RuleError::MissingVerdict(rule.name().to_string()))
            });

            match outcome {
                Ok(verdict) if verdict.valid => {
                    tracing::debug!(rule = rule.name(), "Rule passed");
                }
                Ok(verdict) => {
                    tracing::warn!(
                        rule = rule.name(),
                        from = %request.from,
                        to = %request.to,
                        reason = verdict.reason,
                        "Rule rejected transfer"
                    );
                    return EngineVerdict::rejected(index, verdict.reason);
                }
                Err(e) => {
                    tracing::error!(rule = rule.name(), error = %e, "Rule failed");

                    match self.fail_policy {
                        FailPolicy::FailClosed => {
                            return EngineVerdict::rejected(index, REASON_RULE_FAILURE);
                        }
                        FailPolicy::FailOpen => {
                            tracing::warn!(
                                rule = rule.name(),
                                "FailOpen: continuing despite rule failure"
                            );
                        }
                    }
                }
            }
        }

        EngineVerdict::approved()
    }

    /// Call the after-transfer hook of every rule that declares one
    ///
    /// Stops at the first failing hook.
    pub fn after_transfer(&mut self, request: &TransferRequest) -> RuleResult<()> {
        for rule in self.rules.iter().filter(|rule| rule.has_after_transfer_hook()) {
            if let Err(e) = rule.after_transfer_hook(request) {
                tracing::error!(rule = rule.name(), error = %e, "After-transfer hook failed");
                self.ledger.append(&RuleEvent::hook_rejected(
                    rule.name(),
                    request,
                    e.to_string(),
                    e.code(),
                ))?;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Current fail policy
    pub fn fail_policy(&self) -> FailPolicy {
        self.fail_policy
    }

    /// The verdict ledger (for audit)
    pub fn ledger(&self) -> &VerdictLedger {
        &self.ledger
    }
}
