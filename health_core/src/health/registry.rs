use crate::error::{HealthError, Result};
use crate::health::check::CheckConfig;
use std::collections::HashMap;
use tracing::debug;

/// Ordered set of uniquely named checks.
///
/// Built once at startup and shared read-only (behind an `Arc`) while
/// requests are served.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    checks: Vec<CheckConfig>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, config: CheckConfig) -> Result<()> {
        if config.name().trim().is_empty() {
            return Err(HealthError::Validation(
                "Health check name cannot be empty".to_string(),
            ));
        }

        if config.timeout().is_zero() {
            return Err(HealthError::Validation(format!(
                "Health check '{}' must have a timeout greater than zero",
                config.name()
            )));
        }

        if self.index.contains_key(config.name()) {
            return Err(HealthError::DuplicateName(config.name().to_string()));
        }

        debug!(
            "Registered health check '{}' (timeout {:?}, skip_on_err {})",
            config.name(),
            config.timeout(),
            config.skips_on_err()
        );

        self.index.insert(config.name().to_string(), self.checks.len());
        self.checks.push(config);
        Ok(())
    }

    pub fn with_check(mut self, config: CheckConfig) -> Result<Self> {
        self.register(config)?;
        Ok(self)
    }

    /// Checks in registration order.
    pub fn list(&self) -> &[CheckConfig] {
        &self.checks
    }

    pub fn get(&self, name: &str) -> Option<&CheckConfig> {
        self.index.get(name).map(|&position| &self.checks[position])
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
