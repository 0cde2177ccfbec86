//! Error types for the operation core

use crate::resource::ResourceState;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the retry and polling primitives
#[derive(Error, Debug)]
pub enum CloudError {
    /// The enclosing orchestrator task was halted; observed at a
    /// cancellation checkpoint and never retried.
    #[error("operation cancelled by enclosing task")]
    Cancelled,

    /// Rate-limit rejection carrying the raw response body.
    ///
    /// Absorbed by [`execute_with_retry`](crate::retry::execute_with_retry)
    /// while retries remain; callers only observe it once retries are
    /// exhausted or the body carries no usable hint.
    #[error("provider rate limit exceeded: {body}")]
    RateLimited { body: String },

    #[error("timed out waiting for {resource} to be {target} after {}s", .elapsed.as_secs())]
    Timeout {
        resource: String,
        target: ResourceState,
        elapsed: Duration,
    },

    #[error("{0}: resource not found")]
    NotFound(String),

    #[error("{resource} state is {state}, expected {target}")]
    UnexpectedState {
        resource: String,
        state: ResourceState,
        target: ResourceState,
    },

    /// Any other provider API failure, passed through unmodified so
    /// callers keep the provider-specific detail.
    #[error("provider API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;

/// Logs `err` at error severity, then hands it back as the `Err` arm.
///
/// Every terminal failure detected by the polling state machine is
/// routed through here so operator logs carry the failure before it
/// propagates to the orchestrator above.
pub fn report<T>(err: CloudError) -> Result<T> {
    tracing::error!("{err}");
    Err(err)
}
