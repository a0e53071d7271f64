//! Shared application state for the HTTP server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::extraction::{DocumentTextExtractor, TextExtractor};
use crate::ingestion::IngestionService;
use crate::providers::gemini::GeminiClient;
use crate::providers::youtube::YouTubeClient;
use crate::providers::{GenerativeProvider, VideoSearchProvider};
use crate::roadmap::RoadmapPipeline;
use crate::storage::{CourseRepository, SqliteCourseStore};

/// Application state shared across request handlers
///
/// Holds no per-request mutable state; every read operation takes the course
/// name as an explicit parameter.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    repository: Arc<dyn CourseRepository>,
    generative: Arc<dyn GenerativeProvider>,
    video: Arc<dyn VideoSearchProvider>,
    ingestion: Arc<IngestionService>,
}

impl AppState {
    /// Build state with the real providers
    pub fn new(config: AppConfig) -> Result<Self> {
        let repository: Arc<dyn CourseRepository> =
            Arc::new(SqliteCourseStore::new(&config.storage.db_path)?);
        let generative: Arc<dyn GenerativeProvider> =
            Arc::new(GeminiClient::new(config.gemini.clone())?);
        let video: Arc<dyn VideoSearchProvider> =
            Arc::new(YouTubeClient::new(config.youtube.clone()));

        Ok(Self::with_providers(config, repository, generative, video))
    }

    /// Build state from explicit providers (tests wire fakes through here)
    pub fn with_providers(
        config: AppConfig,
        repository: Arc<dyn CourseRepository>,
        generative: Arc<dyn GenerativeProvider>,
        video: Arc<dyn VideoSearchProvider>,
    ) -> Self {
        let extractor: Arc<dyn TextExtractor> = Arc::new(DocumentTextExtractor);
        let pipeline = Arc::new(RoadmapPipeline::new(generative.clone()));
        let ingestion = Arc::new(IngestionService::new(
            extractor,
            pipeline,
            repository.clone(),
        ));

        Self {
            config: Arc::new(config),
            repository,
            generative,
            video,
            ingestion,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Course repository
    pub fn repository(&self) -> &Arc<dyn CourseRepository> {
        &self.repository
    }

    /// Generative backend
    pub fn generative(&self) -> &Arc<dyn GenerativeProvider> {
        &self.generative
    }

    /// Video lookup backend
    pub fn video(&self) -> &Arc<dyn VideoSearchProvider> {
        &self.video
    }

    /// Ingestion use case
    pub fn ingestion(&self) -> &Arc<IngestionService> {
        &self.ingestion
    }
}
