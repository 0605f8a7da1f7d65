use crate::config::HealthConfig;
use crate::error::Result;
use crate::health::registry::Registry;
use crate::health::report::{AggregatedReport, CheckResult, Component, OverallStatus};
use crate::health::runner;
use crate::monitoring::SystemMonitor;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runs the registry on demand and turns the outcome into a report.
pub struct HealthChecker {
    registry: Arc<Registry>,
    monitor: SystemMonitor,
    component: Option<Component>,
    max_run_duration: Option<Duration>,
}

impl HealthChecker {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            monitor: SystemMonitor::new(),
            component: None,
            max_run_duration: None,
        }
    }

    pub fn from_config(config: &HealthConfig) -> Result<Self> {
        let registry = config.build_registry()?;
        Ok(HealthChecker::new(registry).apply_config(config))
    }

    /// Applies the reporting options of `config` without touching the registry.
    pub fn apply_config(mut self, config: &HealthConfig) -> Self {
        if !config.component.name.is_empty() {
            self = self.with_component(Component::new(
                config.component.name.clone(),
                config.component.version.clone(),
            ));
        }

        if !config.system.enabled {
            self = self.with_system_monitor(SystemMonitor::disabled());
        }

        if let Some(limit) = config.server.max_run_duration() {
            self = self.with_max_run_duration(limit);
        }

        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_system_monitor(mut self, monitor: SystemMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn with_max_run_duration(mut self, limit: Duration) -> Self {
        self.max_run_duration = Some(limit);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn check_all(&self) -> AggregatedReport {
        self.check_all_with(&CancellationToken::new()).await
    }

    /// Same as [`check_all`](Self::check_all), but cancelling `cancel`
    /// stops every check still running.
    pub async fn check_all_with(&self, cancel: &CancellationToken) -> AggregatedReport {
        info!("Running {} health checks", self.registry.len());

        let run_token = cancel.child_token();
        let results = self
            .within_limit(&run_token, runner::run(&self.registry, &run_token))
            .await;

        let report = AggregatedReport::aggregate(&results, self.monitor.collect_metrics())
            .with_component(self.component.clone());

        match report.status {
            OverallStatus::Ok => info!("Health check completed - Overall status: {}", report.status),
            _ => warn!(
                "Health check completed - Overall status: {} ({} failing)",
                report.status,
                report.failures.len()
            ),
        }

        report
    }

    /// Runs one registered check. The overall `max_run_duration` applies
    /// here as well, so a single check never outlives a full run.
    pub async fn check_component(&self, name: &str) -> Option<CheckResult> {
        let config = self.registry.get(name)?;
        let token = CancellationToken::new();
        Some(self.within_limit(&token, runner::run_one(config, &token)).await)
    }

    /// Drives `work` to completion, cancelling `token` if it runs past
    /// `max_run_duration`. Cancelled checks still report, so `work` is
    /// always awaited to the end.
    async fn within_limit<F: Future>(&self, token: &CancellationToken, work: F) -> F::Output {
        let Some(limit) = self.max_run_duration else {
            return work.await;
        };

        tokio::pin!(work);
        tokio::select! {
            output = &mut work => output,
            _ = tokio::time::sleep(limit) => {
                warn!("Health checks exceeded {:?}, cancelling the remaining ones", limit);
                token.cancel();
                work.await
            }
        }
    }
}
