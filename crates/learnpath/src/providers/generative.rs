//! Generative backend provider trait and upload readiness polling

use async_trait::async_trait;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Trait for the generative text backend
///
/// Implementations:
/// - `GeminiClient`: Gemini file-upload + generateContent API
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Upload a syllabus document, wait for it to become usable, and run one
    /// roadmap generation request against it
    ///
    /// Returns the raw textual response verbatim; parsing is the caller's
    /// concern.
    async fn generate_roadmap(&self, document_path: &Path) -> Result<String>;

    /// One-shot text generation with no upload/poll step
    ///
    /// Used by the ancillary features (syllabus-section content,
    /// explanation, translation).
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the roadmap generation model being used
    fn model(&self) -> &str;
}

/// Processing state of an uploaded document on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Still being processed; re-poll later
    Pending,
    /// Usable for generation
    Ready,
    /// Backend gave up on the upload
    Failed,
}

/// Async sleep seam so the poll loop can run against a fake clock in tests
#[async_trait]
pub trait Delay: Send + Sync {
    /// Suspend the current task for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Poll `fetch_state` until the upload is ready
///
/// Each attempt fetches the state once; while pending, waits `interval`
/// between attempts. A failed state aborts with
/// [`Error::GenerationBackend`]; exhausting `max_attempts` polls without
/// reaching ready aborts with [`Error::GenerationTimeout`].
pub async fn await_file_ready<F, Fut>(
    mut fetch_state: F,
    delay: &dyn Delay,
    interval: Duration,
    max_attempts: u32,
) -> Result<()>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<FileState>> + Send,
{
    for attempt in 1..=max_attempts {
        match fetch_state().await? {
            FileState::Ready => return Ok(()),
            FileState::Failed => {
                return Err(Error::backend(
                    "uploaded document failed backend processing".to_string(),
                ));
            }
            FileState::Pending => {
                tracing::debug!("Upload still processing (poll {}/{})", attempt, max_attempts);
                if attempt < max_attempts {
                    delay.sleep(interval).await;
                }
            }
        }
    }

    Err(Error::GenerationTimeout {
        attempts: max_attempts,
    })
}
