//! Video lookup provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for topic-to-video lookup
///
/// Implementations:
/// - `YouTubeClient`: YouTube Data API search
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Return the canonical URL of the first video matching `topic`
    ///
    /// Fails with a not-found error when the search yields nothing.
    async fn find_first_video(&self, topic: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
