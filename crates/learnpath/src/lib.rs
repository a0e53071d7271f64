//! learnpath: course roadmap generator
//!
//! Accepts uploaded course documents, derives a structured learning roadmap
//! via a generative text backend, validates the model output against a fixed
//! schema, and persists the result for later retrieval and enrichment
//! (topic explanations, translations, video lookups).

pub mod config;
pub mod error;
pub mod extraction;
pub mod ingestion;
pub mod providers;
pub mod roadmap;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use ingestion::IngestionService;
pub use roadmap::{parse_and_validate, RoadmapPipeline};
pub use types::{CourseRecord, Roadmap, Unit};
