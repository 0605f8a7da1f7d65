//! Concurrent execution of registered checks

use crate::health::check::{CheckConfig, CheckContext};
use crate::health::registry::Registry;
use crate::health::report::{CheckResult, PANIC_MESSAGE};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Runs every registered check in its own task and waits for all of them.
///
/// Each check gets a child of `cancel`; cancelling it (or dropping the
/// returned future) stops the checks still in flight, which then report
/// `cancelled`. Results that were already in are kept.
///
/// Timeouts and cancellation only take effect at `.await` points, so checks
/// must not block their thread. Wrap synchronous clients in
/// `tokio::task::spawn_blocking`; otherwise a stuck call holds the join
/// barrier until it returns.
pub async fn run(registry: &Registry, cancel: &CancellationToken) -> BTreeMap<String, CheckResult> {
    let run_token = cancel.child_token();
    let _guard = run_token.clone().drop_guard();

    let tasks: Vec<_> = registry
        .list()
        .iter()
        .map(|config| spawn_check(config, run_token.child_token()))
        .collect();

    let joined = join_all(tasks).await;

    registry
        .list()
        .iter()
        .zip(joined)
        .map(|(config, outcome)| (config.name().to_string(), settle(config, outcome)))
        .collect()
}

/// Runs a single check with the same timeout, cancellation and panic
/// handling as [`run`].
pub async fn run_one(config: &CheckConfig, cancel: &CancellationToken) -> CheckResult {
    let token = cancel.child_token();
    let _guard = token.clone().drop_guard();

    let outcome = spawn_check(config, token).await;
    settle(config, outcome)
}

fn spawn_check(config: &CheckConfig, token: CancellationToken) -> JoinHandle<CheckResult> {
    let config = config.clone();
    tokio::spawn(async move { execute(&config, token).await })
}

/// Maps a finished check task to its result; a panic becomes a failure.
fn settle(config: &CheckConfig, outcome: Result<CheckResult, JoinError>) -> CheckResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            error!("Health check '{}' task failed: {}", config.name(), e);
            let reason = if e.is_panic() {
                PANIC_MESSAGE.to_string()
            } else {
                format!("Health check task failed: {}", e)
            };
            CheckResult::failed(config, reason, Duration::ZERO)
        }
    }
}

async fn execute(config: &CheckConfig, token: CancellationToken) -> CheckResult {
    let started = Instant::now();
    let deadline = started + config.timeout();
    let ctx = CheckContext::new(config.name(), deadline, token.clone());

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => CheckResult::cancelled(config, started.elapsed()),
        outcome = tokio::time::timeout_at(deadline, config.check().check(ctx)) => match outcome {
            Ok(Ok(())) => CheckResult::ok(config, started.elapsed()),
            Ok(Err(e)) => CheckResult::failed(config, format!("{:#}", e), started.elapsed()),
            Err(_) => CheckResult::timeout(config, started.elapsed()),
        },
    };

    // Let a check that spawned its own work know the invocation is over.
    token.cancel();

    log_result(&result);
    result
}

fn log_result(result: &CheckResult) {
    let error = result.error.as_deref().unwrap_or_default();
    if result.is_ok() {
        debug!("Health check '{}' passed in {:?}", result.name, result.duration);
    } else if result.skip_on_err {
        warn!(
            "Health check '{}' {} in {:?} (skippable): {}",
            result.name, result.status, result.duration, error
        );
    } else {
        error!(
            "Health check '{}' {} in {:?}: {}",
            result.name, result.status, result.duration, error
        );
    }
}
