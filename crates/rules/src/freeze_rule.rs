//! User freeze rule
//!
//! Refuses transfers whose sender is frozen for sending or whose
//! receiver is frozen for receiving, according to the freeze attributes
//! stored in the Compliance Registry.
//!
//! Decision order:
//! 1. Either party unknown without `allow_not_found` → reason 2 (sender
//!    unknown) or 3 (receiver unknown)
//! 2. Sender known and frozen for send → reason 2
//! 3. Receiver known and frozen for receive → reason 3
//! 4. Approved
//!
//! With `allow_not_found`, an unknown party is simply not checked.

use std::sync::{Arc, PoisonError, RwLock};

use freezeguard_core::Timestamp;
use freezeguard_registry::{ComplianceRegistry, RegistryQuery};

use crate::clock::Clock;
use crate::error::{RuleError, RuleResult};
use crate::freeze::{FreezeProfile, TransferSide};
use crate::request::TransferRequest;
use crate::sink::ResultSink;
use crate::traits::Rule;
use crate::verdict::{Verdict, REASON_RECEIVER_RESTRICTED, REASON_SENDER_RESTRICTED};

/// Freeze rule bound to a shared registry and a clock
pub struct UserFreezeRule<R = ComplianceRegistry> {
    registry: Arc<RwLock<R>>,
    clock: Arc<dyn Clock>,
}

impl<R: RegistryQuery> UserFreezeRule<R> {
    /// Rule name used in logs and ledger events
    pub const NAME: &'static str = "user_freeze_rule";

    pub fn new(registry: Arc<RwLock<R>>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Evaluate against the current registry state and clock
    pub fn check(&self, request: &TransferRequest) -> Verdict {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        evaluate(&*registry, request, now)
    }
}

/// Pure freeze decision for a registry state and an instant
pub fn evaluate(registry: &dyn RegistryQuery, request: &TransferRequest, now: Timestamp) -> Verdict {
    let intermediaries = &request.trusted_intermediaries;
    let sender = registry.user_id(intermediaries, &request.from);
    let receiver = registry.user_id(intermediaries, &request.to);

    if !request.allow_not_found && (sender.is_none() || receiver.is_none()) {
        let reason = if sender.is_none() {
            REASON_SENDER_RESTRICTED
        } else {
            REASON_RECEIVER_RESTRICTED
        };
        tracing::debug!(from = %request.from, to = %request.to, reason, "Party not registered");
        return Verdict::rejected(reason);
    }

    if let Some(sender) = &sender {
        let profile = FreezeProfile::read(registry, sender);
        if profile.is_frozen(TransferSide::Send, now) {
            tracing::debug!(
                from = %request.from,
                direction = %profile.direction,
                mode = %profile.window.mode,
                now,
                "Sender frozen"
            );
            return Verdict::rejected(REASON_SENDER_RESTRICTED);
        }
    }

    if let Some(receiver) = &receiver {
        let profile = FreezeProfile::read(registry, receiver);
        if profile.is_frozen(TransferSide::Receive, now) {
            tracing::debug!(
                to = %request.to,
                direction = %profile.direction,
                mode = %profile.window.mode,
                now,
                "Receiver frozen"
            );
            return Verdict::rejected(REASON_RECEIVER_RESTRICTED);
        }
    }

    Verdict::approved()
}

impl<R: RegistryQuery + Send + Sync> Rule for UserFreezeRule<R> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_transfer_valid(&self, request: &TransferRequest, sink: &dyn ResultSink) -> RuleResult<()> {
        sink.report(self.check(request));
        Ok(())
    }

    fn after_transfer_hook(&self, _request: &TransferRequest) -> RuleResult<()> {
        Err(RuleError::not_implemented(Self::NAME))
    }
}
