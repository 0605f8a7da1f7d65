pub mod check;
pub mod checker;
pub mod registry;
pub mod report;
pub mod runner;


pub use check::{Check, CheckConfig, CheckContext, DEFAULT_TIMEOUT};
pub use checker::HealthChecker;
pub use registry::Registry;
pub use report::{AggregatedReport, CheckResult, CheckStatus, Component, OverallStatus};
