//! CLI commands

use std::sync::PoisonError;

use freezeguard_core::{Address, Timestamp};
use freezeguard_registry::{RegistryQuery, UserRef};
use freezeguard_rules::{EngineVerdict, FreezeProfile, TransferRequest, TransferSide};
use serde::Serialize;

use crate::context::AppContext;

/// Resolved user and decoded freeze state of an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub address: Address,
    pub user: Option<UserRef>,
    pub profile: Option<FreezeProfile>,
    pub frozen_for_send: bool,
    pub frozen_for_receive: bool,
    pub at: Timestamp,
}

/// Run a transfer through the rule engine
pub fn check(
    ctx: &AppContext,
    from: Address,
    to: Address,
    allow_not_found: bool,
    at: Option<Timestamp>,
) -> anyhow::Result<EngineVerdict> {
    let request = TransferRequest::new(from, to)
        .with_allow_not_found(allow_not_found || ctx.config.allow_not_found)
        .with_trusted_intermediaries(ctx.trusted_intermediaries());

    let mut engine = ctx.engine(AppContext::clock(at))?;
    let verdict = engine.validate(&request)?;

    tracing::info!(
        from = %request.from,
        to = %request.to,
        valid = verdict.valid,
        reason = verdict.reason,
        "Transfer checked"
    );
    Ok(verdict)
}

/// Resolve an address and decode its freeze attributes
pub fn inspect(ctx: &AppContext, address: Address, at: Option<Timestamp>) -> anyhow::Result<Inspection> {
    let now = AppContext::clock(at).now();
    let registry = ctx.registry.read().unwrap_or_else(PoisonError::into_inner);

    let user = registry.user_id(&ctx.trusted_intermediaries(), &address);
    let profile = user.as_ref().map(|user| FreezeProfile::read(&*registry, user));
    let frozen = |side: TransferSide| profile.is_some_and(|p| p.is_frozen(side, now));

    Ok(Inspection {
        frozen_for_send: frozen(TransferSide::Send),
        frozen_for_receive: frozen(TransferSide::Receive),
        address,
        user,
        profile,
        at: now,
    })
}
