//! Application context - wires registry, config and rules together

use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use freezeguard_core::{Address, Timestamp};
use freezeguard_registry::{ComplianceRegistry, RegistrySnapshot};
use freezeguard_rules::{Clock, EngineConfig, FixedClock, RuleEngine, SystemClock, UserFreezeRule};

/// Application context loaded from files
pub struct AppContext {
    pub registry: Arc<RwLock<ComplianceRegistry>>,
    pub config: EngineConfig,
    /// Intermediaries seen in the snapshot, in order of first appearance
    known_intermediaries: Vec<Address>,
}

impl AppContext {
    /// Load a registry snapshot and an optional engine config
    pub fn load(registry_path: &Path, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let snapshot = RegistrySnapshot::from_file(registry_path).with_context(|| {
            format!("Failed to read registry snapshot {}", registry_path.display())
        })?;
        let registry = ComplianceRegistry::from_snapshot(&snapshot)?;

        let config = match config_path {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        let mut known_intermediaries: Vec<Address> = Vec::new();
        for entry in &snapshot.users {
            if !known_intermediaries.contains(&entry.trusted_intermediary) {
                known_intermediaries.push(entry.trusted_intermediary.clone());
            }
        }

        tracing::debug!(
            users = snapshot.users.len(),
            intermediaries = known_intermediaries.len(),
            "Loaded registry snapshot"
        );

        Ok(Self {
            registry: Arc::new(RwLock::new(registry)),
            config,
            known_intermediaries,
        })
    }

    /// Intermediaries to search: the configured list, or every
    /// intermediary in the snapshot when none is configured
    pub fn trusted_intermediaries(&self) -> Vec<Address> {
        if self.config.trusted_intermediaries.is_empty() {
            self.known_intermediaries.clone()
        } else {
            self.config.trusted_intermediaries.clone()
        }
    }

    /// Fixed clock at `at`, wall clock otherwise
    pub fn clock(at: Option<Timestamp>) -> Arc<dyn Clock> {
        match at {
            Some(now) => Arc::new(FixedClock::new(now)),
            None => Arc::new(SystemClock),
        }
    }

    /// Build an engine running the freeze rule against this registry
    pub fn engine(&self, clock: Arc<dyn Clock>) -> anyhow::Result<RuleEngine> {
        let mut engine = RuleEngine::from_config(&self.config)?;
        engine.register_rule(Arc::new(UserFreezeRule::new(self.registry.clone(), clock)));
        Ok(engine)
    }
}
