//! Document-to-roadmap pipeline: prompting, validation, orchestration

pub mod pipeline;
pub mod prompt;
pub mod validator;

pub use pipeline::RoadmapPipeline;
pub use validator::parse_and_validate;
