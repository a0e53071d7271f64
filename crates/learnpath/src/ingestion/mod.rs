//! Top-level ingestion use case
//!
//! Validates inputs, extracts the objective document, runs the roadmap
//! pipeline on the syllabus document, and persists the combined record. Any
//! failure aborts the whole ingestion; no partial record is persisted.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::extraction::TextExtractor;
use crate::roadmap::RoadmapPipeline;
use crate::storage::CourseRepository;
use crate::types::{IngestForm, IngestSummary, NewCourseRecord};

/// Ingestion service wiring extractor, pipeline and repository
pub struct IngestionService {
    extractor: Arc<dyn TextExtractor>,
    pipeline: Arc<RoadmapPipeline>,
    repository: Arc<dyn CourseRepository>,
}

impl IngestionService {
    /// Create a new ingestion service
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        pipeline: Arc<RoadmapPipeline>,
        repository: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            extractor,
            pipeline,
            repository,
        }
    }

    /// Run one ingestion
    ///
    /// Inputs are checked before any I/O happens; the record is only saved
    /// after both documents processed successfully.
    pub async fn ingest(&self, form: IngestForm) -> Result<IngestSummary> {
        Self::validate_form(&form)?;

        let objective = self.extractor.extract_text(&form.objective_path)?;
        tracing::debug!(
            "Extracted {} chars of objective text for '{}'",
            objective.len(),
            form.name
        );

        let roadmap = self.pipeline.build_roadmap(&form.syllabus_path).await?;

        let record = NewCourseRecord {
            name: form.name,
            career_interest: form.career_interest,
            expertise: form.expertise,
            objective,
            roadmap: roadmap.clone(),
        };
        self.repository.save(record).await?;

        Ok(IngestSummary {
            course_name: roadmap.course_name,
        })
    }

    fn validate_form(form: &IngestForm) -> Result<()> {
        let missing = [
            ("name", form.name.trim().is_empty()),
            ("careerInterest", form.career_interest.trim().is_empty()),
            ("expertise", form.expertise.trim().is_empty()),
            (
                "file1",
                form.objective_path.as_os_str().is_empty(),
            ),
            ("file2", form.syllabus_path.as_os_str().is_empty()),
        ];

        for (field, is_missing) in missing {
            if is_missing {
                return Err(Error::invalid_input(format!(
                    "missing required field: {}",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::GenerativeProvider;
    use crate::storage::SqliteCourseStore;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingExtractor {
        calls: AtomicU32,
    }

    impl TextExtractor for CountingExtractor {
        fn extract_text(&self, _path: &Path) -> crate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("course objective text".to_string())
        }
    }

    struct CountingProvider {
        calls: AtomicU32,
        raw: String,
    }

    #[async_trait]
    impl GenerativeProvider for CountingProvider {
        async fn generate_roadmap(&self, _document_path: &Path) -> crate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.raw.clone())
        }

        async fn generate_text(&self, _prompt: &str) -> crate::error::Result<String> {
            unimplemented!("not used by ingestion")
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "counting"
        }
    }

    fn service_with_fakes() -> (
        IngestionService,
        Arc<CountingExtractor>,
        Arc<CountingProvider>,
        Arc<SqliteCourseStore>,
    ) {
        let extractor = Arc::new(CountingExtractor {
            calls: AtomicU32::new(0),
        });
        let provider = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
            raw: r#"{"roadMap":{"course_name":"OS","roadmap":[{"unit_number":"1","unit_title":"Intro","topics":["Processes"]}]}}"#.to_string(),
        });
        let repository = Arc::new(SqliteCourseStore::in_memory().unwrap());
        let service = IngestionService::new(
            extractor.clone(),
            Arc::new(RoadmapPipeline::new(provider.clone())),
            repository.clone(),
        );
        (service, extractor, provider, repository)
    }

    fn valid_form() -> IngestForm {
        IngestForm {
            name: "Alice".to_string(),
            career_interest: "Systems".to_string(),
            expertise: "Beginner".to_string(),
            objective_path: PathBuf::from("objective.pdf"),
            syllabus_path: PathBuf::from("syllabus.pdf"),
        }
    }

    #[tokio::test]
    async fn successful_ingest_persists_once_and_returns_course_name() {
        let (service, extractor, provider, repository) = service_with_fakes();

        let summary = service.ingest(valid_form()).await.unwrap();
        assert_eq!(summary.course_name, "OS");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let record = repository.find_by_course_name("Alice").await.unwrap();
        assert_eq!(record.objective, "course objective text");
        assert_eq!(record.roadmap.course_name, "OS");
    }

    #[tokio::test]
    async fn empty_name_fails_before_any_io() {
        let (service, extractor, provider, _) = service_with_fakes();

        let mut form = valid_form();
        form.name = "".to_string();
        let err = service.ingest(form).await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_generation_persists_nothing() {
        let extractor = Arc::new(CountingExtractor {
            calls: AtomicU32::new(0),
        });
        let provider = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
            raw: "not json".to_string(),
        });
        let repository = Arc::new(SqliteCourseStore::in_memory().unwrap());
        let service = IngestionService::new(
            extractor,
            Arc::new(RoadmapPipeline::new(provider)),
            repository.clone(),
        );

        let err = service.ingest(valid_form()).await.unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(repository.find_by_course_name("Alice").await.is_err());
    }

    #[test]
    fn validation_names_the_missing_field() {
        let mut form = valid_form();
        form.expertise = "  ".to_string();
        let err = IngestionService::validate_form(&form).unwrap_err();
        assert!(err.to_string().contains("expertise"));
    }
}
