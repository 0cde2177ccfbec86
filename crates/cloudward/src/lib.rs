//! Cloudward Operation Core
//!
//! This crate provides the resilient operation core a cloud provider
//! integration needs to be safe against API rate limits and partially
//! provisioned resources: a retry executor that honours
//! provider-supplied backoff hints, and a state poller that waits for
//! an asynchronously provisioned resource to settle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 CPI call sites                   │
//! │     (create server, attach volume, delete...)    │
//! └─────────┬───────────────────────┬───────────────┘
//!           │                       │
//! ┌─────────▼──────────┐  ┌─────────▼──────────┐
//! │ execute_with_retry │  │   wait_for_state   │
//! │ (rate-limit retry) │  │ (poll until done)  │
//! └─────────┬──────────┘  └─────────┬──────────┘
//!           │                       │
//! ┌─────────▼───────────────────────▼───────────────┐
//! │      CancelToken · CloudError · tracing          │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! A call site wraps each provider API call in [`execute_with_retry`];
//! when the call kicks off asynchronous provisioning, it then polls
//! the resulting resource with [`wait_for_state`] through the
//! [`ResourceHandle`] capability trait. Both primitives consult the
//! same [`CancelToken`] on every iteration, so an operator halting the
//! enclosing task stops the loops at their next checkpoint.

pub mod cancel;
pub mod error;
pub mod poll;
pub mod resource;
pub mod retry;

// Re-exports
pub use cancel::CancelToken;
pub use error::{CloudError, Result, report};
pub use poll::{DEFAULT_TIMEOUT, POLL_INTERVAL, PollConfig, wait_for_state};
pub use resource::{ResourceHandle, ResourceState};
pub use retry::{DEFAULT_BACKOFF, MAX_RETRIES, RetryConfig, execute_with_retry};
