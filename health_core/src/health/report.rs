//! Per-check results and the aggregated status report

use crate::health::check::CheckConfig;
use crate::monitoring::SystemMetrics;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

pub const TIMEOUT_MESSAGE: &str = "Timeout during health check";
pub const CANCELLED_MESSAGE: &str = "Health check cancelled";
pub const PANIC_MESSAGE: &str = "Health check panicked";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Failed,
    Timeout,
    Cancelled,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "ok"),
            CheckStatus::Failed => write!(f, "failed"),
            CheckStatus::Timeout => write!(f, "timeout"),
            CheckStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub error: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub skip_on_err: bool,
}

impl CheckResult {
    pub fn ok(config: &CheckConfig, duration: Duration) -> Self {
        Self::new(config, CheckStatus::Ok, None, duration)
    }

    pub fn failed(config: &CheckConfig, error: String, duration: Duration) -> Self {
        Self::new(config, CheckStatus::Failed, Some(error), duration)
    }

    pub fn timeout(config: &CheckConfig, duration: Duration) -> Self {
        Self::new(
            config,
            CheckStatus::Timeout,
            Some(TIMEOUT_MESSAGE.to_string()),
            duration,
        )
    }

    pub fn cancelled(config: &CheckConfig, duration: Duration) -> Self {
        Self::new(
            config,
            CheckStatus::Cancelled,
            Some(CANCELLED_MESSAGE.to_string()),
            duration,
        )
    }

    fn new(
        config: &CheckConfig,
        status: CheckStatus,
        error: Option<String>,
        duration: Duration,
    ) -> Self {
        Self {
            name: config.name().to_string(),
            status,
            error,
            duration,
            skip_on_err: config.skips_on_err(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Overall verdict. Ordered so that the worst status compares greatest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverallStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Partially Available")]
    PartiallyAvailable,
    #[serde(rename = "Unavailable")]
    Unavailable,
}

impl OverallStatus {
    /// Reduces check results to a single status: a failure of a check
    /// without `skip_on_err` makes the whole report unavailable.
    pub fn reduce<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a CheckResult>,
    {
        results
            .into_iter()
            .filter(|result| !result.is_ok())
            .map(|result| {
                if result.skip_on_err {
                    OverallStatus::PartiallyAvailable
                } else {
                    OverallStatus::Unavailable
                }
            })
            .max()
            .unwrap_or(OverallStatus::Ok)
    }

    pub fn is_available(&self) -> bool {
        *self != OverallStatus::Unavailable
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Ok => write!(f, "OK"),
            OverallStatus::PartiallyAvailable => write!(f, "Partially Available"),
            OverallStatus::Unavailable => write!(f, "Unavailable"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub name: String,
    pub version: String,
}

impl Component {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedReport {
    pub status: OverallStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub failures: BTreeMap<String, String>,
    pub system: SystemMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
}

impl AggregatedReport {
    pub fn aggregate(results: &BTreeMap<String, CheckResult>, system: SystemMetrics) -> Self {
        let status = OverallStatus::reduce(results.values());

        let failures = results
            .iter()
            .filter(|(_, result)| !result.is_ok())
            .map(|(name, result)| {
                let message = result
                    .error
                    .clone()
                    .unwrap_or_else(|| result.status.to_string());
                (name.clone(), message)
            })
            .collect();

        Self {
            status,
            timestamp: chrono::Utc::now(),
            failures,
            system,
            component: None,
        }
    }

    pub fn with_component(mut self, component: Option<Component>) -> Self {
        self.component = component;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}
