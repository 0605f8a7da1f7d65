//! Check capability and per-check configuration

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Everything a running check can observe about its own invocation.
///
/// The token is cancelled once the check's timeout elapses or the
/// surrounding run is cancelled, so long-running checks can bail out early.
#[derive(Debug, Clone)]
pub struct CheckContext {
    name: String,
    deadline: Instant,
    token: CancellationToken,
}

impl CheckContext {
    pub fn new(name: impl Into<String>, deadline: Instant, token: CancellationToken) -> Self {
        Self {
            name: name.into(),
            deadline,
            token,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }
}

/// An availability check run on the tokio runtime.
///
/// Implementations must stay asynchronous: timeouts and cancellation are
/// only observed at `.await` points, so a check that blocks its thread is
/// never timed out and holds up the whole run. Move blocking client calls
/// onto `tokio::task::spawn_blocking` and await the handle.
#[async_trait::async_trait]
pub trait Check: Send + Sync {
    async fn check(&self, ctx: CheckContext) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<F, Fut> Check for F
where
    F: Fn(CheckContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn check(&self, ctx: CheckContext) -> anyhow::Result<()> {
        (self)(ctx).await
    }
}

/// A named check plus the policy it runs under. Cheap to clone.
#[derive(Clone)]
pub struct CheckConfig {
    name: String,
    timeout: Duration,
    skip_on_err: bool,
    check: Arc<dyn Check>,
}

impl CheckConfig {
    pub fn new<C>(name: impl Into<String>, check: C) -> Self
    where
        C: Check + 'static,
    {
        Self {
            name: name.into(),
            timeout: DEFAULT_TIMEOUT,
            skip_on_err: false,
            check: Arc::new(check),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn skip_on_err(mut self, skip_on_err: bool) -> Self {
        self.skip_on_err = skip_on_err;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn skips_on_err(&self) -> bool {
        self.skip_on_err
    }

    pub fn check(&self) -> &Arc<dyn Check> {
        &self.check
    }
}

impl fmt::Debug for CheckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckConfig")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .field("skip_on_err", &self.skip_on_err)
            .finish_non_exhaustive()
    }
}
