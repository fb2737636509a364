//! FreezeGuard CLI - command orchestration
//!
//! This crate provides the `freezeguard` binary and the commands it runs.

pub mod commands;
pub mod context;

pub use context::AppContext;
