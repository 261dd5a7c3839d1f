//! Bounded retry loop shared by all readiness checks

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::errors::{OrchestratorError, Result};

/// Outcome of a single readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Ready,
    /// Not in the target state yet; worth retrying.
    NotReady(String),
    /// The check itself failed in a way that will not self-heal.
    /// Aborts the retry loop without consuming the remaining budget.
    Unrecoverable(String),
}

/// Attempt budget and fixed inter-attempt delay for one readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Repeatedly invoke `probe` until it reports `Ready`, reports an
/// unrecoverable condition, or the attempt budget is exhausted.
///
/// The delay is only slept between attempts, never after the last one, so
/// a policy with `max_attempts = 1` performs exactly one check with no
/// sleep. A zero budget is clamped to one attempt.
pub async fn wait_until_ready<F, Fut>(what: &str, policy: &RetryPolicy, mut probe: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Verdict>,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match probe().await {
            Verdict::Ready => {
                info!("{} is ready", what);
                return Ok(());
            }
            Verdict::NotReady(reason) => {
                warn!(
                    "{} not ready: {} (attempt {}/{})",
                    what, reason, attempt, max_attempts
                );
                if attempt < max_attempts {
                    sleep(policy.delay).await;
                }
            }
            Verdict::Unrecoverable(reason) => {
                return Err(OrchestratorError::ProbeFailed {
                    what: what.to_string(),
                    reason,
                });
            }
        }
    }

    Err(OrchestratorError::RetriesExhausted {
        what: what.to_string(),
        attempts: max_attempts,
    })
}
