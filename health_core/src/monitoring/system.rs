//! Process and runtime metrics reported alongside health checks

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use sysinfo::{Pid, System};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemMetrics {
    pub version: String,
    pub os: String,
    pub arch: String,
    pub worker_threads: usize,
    pub tasks_count: usize,
    pub memory_bytes: u64,
    pub virtual_memory_bytes: u64,
    pub cpu_usage_percent: f32,
    pub uptime_seconds: u64,
}

pub struct SystemMonitor {
    system: Option<Mutex<System>>,
    current_pid: Option<Pid>,
    start_time: Instant,
}

impl SystemMonitor {
    pub fn new() -> Self {
        let current_pid = sysinfo::get_current_pid().ok();

        let mut system = System::new();
        if let Some(pid) = current_pid {
            system.refresh_process(pid);
        }

        Self {
            system: Some(Mutex::new(system)),
            current_pid,
            start_time: Instant::now(),
        }
    }

    /// A monitor that reports only static build and runtime information.
    pub fn disabled() -> Self {
        Self {
            system: None,
            current_pid: None,
            start_time: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.system.is_some()
    }

    pub fn collect_metrics(&self) -> SystemMetrics {
        let (worker_threads, tasks_count) = runtime_counts();

        let mut metrics = SystemMetrics {
            version: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            worker_threads,
            tasks_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            ..SystemMetrics::default()
        };

        if let (Some(system), Some(pid)) = (&self.system, self.current_pid) {
            let mut system = system.lock();
            if system.refresh_process(pid) {
                if let Some(process) = system.process(pid) {
                    metrics.memory_bytes = process.memory();
                    metrics.virtual_memory_bytes = process.virtual_memory();
                    metrics.cpu_usage_percent = process.cpu_usage();
                }
            }
        }

        debug!(
            "Collected system metrics: tasks: {}, memory: {} bytes",
            metrics.tasks_count, metrics.memory_bytes
        );

        metrics
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

fn runtime_counts() -> (usize, usize) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let metrics = handle.metrics();
            (metrics.num_workers(), metrics.num_alive_tasks())
        }
        Err(_) => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_monitor_creation() {
        let monitor = SystemMonitor::new();
        assert!(monitor.is_enabled());
        assert!(monitor.current_pid.is_some());
    }

    #[test]
    fn test_metrics_collection() {
        let monitor = SystemMonitor::new();
        let metrics = monitor.collect_metrics();

        assert!(metrics.version.starts_with("health_core"));
        assert_eq!(metrics.arch, std::env::consts::ARCH);
        assert!(metrics.memory_bytes > 0);
        assert!(metrics.cpu_usage_percent >= 0.0);
    }

    #[test]
    fn test_metrics_outside_runtime() {
        let metrics = SystemMonitor::new().collect_metrics();
        assert_eq!(metrics.worker_threads, 0);
        assert_eq!(metrics.tasks_count, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_metrics_inside_runtime() {
        let metrics = SystemMonitor::new().collect_metrics();
        assert_eq!(metrics.worker_threads, 2);
    }

    #[test]
    fn test_disabled_monitor() {
        let monitor = SystemMonitor::disabled();
        assert!(!monitor.is_enabled());

        let metrics = monitor.collect_metrics();
        assert_eq!(metrics.memory_bytes, 0);
        assert_eq!(metrics.virtual_memory_bytes, 0);
        assert_eq!(metrics.os, std::env::consts::OS);
    }
}
