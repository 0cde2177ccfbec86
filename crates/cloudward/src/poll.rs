//! Poll a provisioning resource until it reaches a target state

use crate::cancel::CancelToken;
use crate::error::{CloudError, Result, report};
use crate::resource::{ResourceHandle, ResourceState};
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Default wall-clock budget for reaching the target state.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Fixed sleep between polling ticks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polling policy for a single wait.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Resource state field to inspect.
    pub state_field: String,

    /// Treat a vanished resource as success (deletion waits).
    pub allow_missing: bool,

    /// Wall-clock budget, measured from the first tick.
    pub timeout: Duration,

    /// Sleep between ticks.
    pub tick: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            state_field: "status".to_string(),
            allow_missing: false,
            timeout: DEFAULT_TIMEOUT,
            tick: POLL_INTERVAL,
        }
    }
}

impl PollConfig {
    pub fn with_state_field(mut self, field: impl Into<String>) -> Self {
        self.state_field = field.into();
        self
    }

    pub fn with_allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

/// Waits until `resource` reports `target`.
///
/// Each tick checks the cancel token, then the timeout budget, then
/// reloads the resource, in that order: a zero or already-spent budget
/// fails before the state is consulted at all. A vanished resource
/// ends the wait, successfully when `config.allow_missing` is set and
/// with [`CloudError::NotFound`] otherwise. A terminal state (`error`,
/// `failed`) that is not itself the target fails with
/// [`CloudError::UnexpectedState`]. Exactly one of success,
/// `Cancelled`, `Timeout`, `NotFound`, `UnexpectedState`, or a reload
/// failure ends every wait; the loop never exits silently.
pub async fn wait_for_state<R>(
    cancel: &CancelToken,
    resource: &mut R,
    target: &ResourceState,
    config: &PollConfig,
) -> Result<()>
where
    R: ResourceHandle,
{
    let started_at = Instant::now();
    let desc = resource.describe();

    loop {
        cancel.checkpoint()?;

        let elapsed = started_at.elapsed();
        if elapsed >= config.timeout {
            return report(CloudError::Timeout {
                resource: desc,
                target: target.clone(),
                elapsed,
            });
        }

        tracing::debug!(
            "waiting for {} to be {} ({}s)",
            desc,
            target,
            elapsed.as_secs()
        );

        let state = match resource.reload(&config.state_field).await? {
            Some(state) => state,
            // The resource going away is the awaited outcome when
            // polling out a deletion.
            None if config.allow_missing => break,
            None => return report(CloudError::NotFound(desc)),
        };

        if state == *target {
            break;
        }

        if state.is_terminal() {
            return report(CloudError::UnexpectedState {
                resource: desc,
                state,
                target: target.clone(),
            });
        }

        sleep(config.tick).await;
    }

    tracing::info!(
        "{} is now {}, took {}s",
        desc,
        target,
        started_at.elapsed().as_secs()
    );

    Ok(())
}
