//! Provider abstractions for the generative backend and video lookup
//!
//! Trait-based seams so the pipeline and routes can be exercised against
//! fakes in tests.

pub mod gemini;
pub mod generative;
pub mod video;
pub mod youtube;

pub use generative::{Delay, FileState, GenerativeProvider, TokioDelay};
pub use video::VideoSearchProvider;
