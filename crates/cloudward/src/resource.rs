//! Resource handles and normalized state values

use crate::error::Result;
use async_trait::async_trait;

/// Normalized state value of a remote cloud resource.
///
/// Providers disagree on capitalization and padding, so the raw value
/// is trimmed and lowercased on construction; comparing against a
/// target state is case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceState(String);

impl ResourceState {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the states (`error`, `failed`) from which no further
    /// progress toward a target state is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self.0.as_str(), "error" | "failed")
    }
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceState {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ResourceState {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl PartialEq<str> for ResourceState {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceState {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Narrow capability interface the poller needs from a remote object.
///
/// Implemented once per resource kind (server, volume, load balancer,
/// ...); the polling loop is written against this trait rather than
/// against any provider SDK type.
#[async_trait]
pub trait ResourceHandle: Send {
    /// Provider-assigned identifier, immutable after creation.
    fn id(&self) -> &str;

    /// Short resource noun used in log and error messages, e.g. "server".
    fn kind(&self) -> &str;

    /// Description used in messages: `server 'srv-42'`.
    fn describe(&self) -> String {
        format!("{} '{}'", self.kind(), self.id())
    }

    /// Re-fetches the resource and returns the value of `field`.
    ///
    /// `Ok(None)` means the provider no longer knows the resource,
    /// which is the expected outcome when waiting out a deletion.
    /// Provider failures surface as [`CloudError::Api`] and are passed
    /// through the poller unchanged.
    ///
    /// [`CloudError::Api`]: crate::error::CloudError::Api
    async fn reload(&mut self, field: &str) -> Result<Option<ResourceState>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_padding() {
        assert_eq!(ResourceState::new(" ACTIVE "), ResourceState::new("active"));
        assert_eq!(ResourceState::new("Build").as_str(), "build");
    }

    #[test]
    fn terminal_states() {
        assert!(ResourceState::new("ERROR").is_terminal());
        assert!(ResourceState::new("failed").is_terminal());
        assert!(!ResourceState::new("active").is_terminal());
        assert!(!ResourceState::new("deleting").is_terminal());
    }

    #[test]
    fn compares_against_plain_strings() {
        assert_eq!(ResourceState::new("SHUTOFF"), "shutoff");
    }
}
