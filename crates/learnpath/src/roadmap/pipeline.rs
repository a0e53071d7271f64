//! Roadmap pipeline: generation composed with validation

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::GenerativeProvider;
use crate::types::Roadmap;

use super::validator::parse_and_validate;

/// Orchestrates generation and validation into one roadmap-producing step
///
/// Success yields a fully validated [`Roadmap`]; backend and schema errors
/// propagate unchanged and no partial result is ever returned.
pub struct RoadmapPipeline {
    generative: Arc<dyn GenerativeProvider>,
}

impl RoadmapPipeline {
    /// Create a pipeline over the given generative backend
    pub fn new(generative: Arc<dyn GenerativeProvider>) -> Self {
        Self { generative }
    }

    /// Build a validated roadmap from the syllabus document at `path`
    pub async fn build_roadmap(&self, path: &Path) -> Result<Roadmap> {
        let raw = self.generative.generate_roadmap(path).await?;
        tracing::debug!(
            "Generation returned {} bytes from {}",
            raw.len(),
            self.generative.name()
        );
        let roadmap = parse_and_validate(&raw)?;
        tracing::info!(
            "Validated roadmap '{}': {} units, {} topics",
            roadmap.course_name,
            roadmap.units.len(),
            roadmap.topic_count()
        );
        Ok(roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;

    /// Generative backend scripted with a fixed response
    struct ScriptedProvider {
        response: Result<String>,
    }

    impl ScriptedProvider {
        fn ok(raw: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(raw.to_string()),
            })
        }

        fn failing(err: Error) -> Arc<Self> {
            Arc::new(Self { response: Err(err) })
        }
    }

    #[async_trait]
    impl GenerativeProvider for ScriptedProvider {
        async fn generate_roadmap(&self, _document_path: &Path) -> Result<String> {
            match &self.response {
                Ok(raw) => Ok(raw.clone()),
                Err(Error::GenerationBackend(msg)) => Err(Error::backend(msg.clone())),
                Err(Error::GenerationTimeout { attempts }) => Err(Error::GenerationTimeout {
                    attempts: *attempts,
                }),
                Err(other) => Err(Error::internal(other.to_string())),
            }
        }

        async fn generate_text(&self, _prompt: &str) -> Result<String> {
            unimplemented!("not used by the pipeline")
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn valid_generation_yields_roadmap() {
        let provider = ScriptedProvider::ok(
            r#"{"roadMap":{"course_name":"OS","roadmap":[{"unit_number":"1","unit_title":"Intro","topics":["Processes"]}]}}"#,
        );
        let pipeline = RoadmapPipeline::new(provider);

        let roadmap = pipeline.build_roadmap(Path::new("syllabus.pdf")).await.unwrap();
        assert_eq!(roadmap.course_name, "OS");
        assert_eq!(roadmap.units.len(), 1);
    }

    #[tokio::test]
    async fn backend_failure_propagates_unchanged() {
        let provider = ScriptedProvider::failing(Error::backend("upload failed processing"));
        let pipeline = RoadmapPipeline::new(provider);

        let err = pipeline
            .build_roadmap(Path::new("syllabus.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenerationBackend(_)));
    }

    #[tokio::test]
    async fn timeout_propagates_unchanged() {
        let provider = ScriptedProvider::failing(Error::GenerationTimeout { attempts: 30 });
        let pipeline = RoadmapPipeline::new(provider);

        let err = pipeline
            .build_roadmap(Path::new("syllabus.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenerationTimeout { attempts: 30 }));
    }

    #[tokio::test]
    async fn invalid_output_is_schema_error() {
        let provider = ScriptedProvider::ok("not json");
        let pipeline = RoadmapPipeline::new(provider);

        let err = pipeline
            .build_roadmap(Path::new("syllabus.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
