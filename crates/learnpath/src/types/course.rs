//! Roadmap and course record types
//!
//! These are the only representations of generation output that exist
//! downstream of validation; no component past the validator touches raw
//! JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One numbered section of a roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit number as emitted by the model (e.g. "1", "II")
    pub unit_number: String,
    /// Unit title
    pub unit_title: String,
    /// Ordered, non-empty list of topics
    pub topics: Vec<String>,
}

/// Structured, unit-by-unit curriculum derived from a syllabus document
///
/// Unit order is the presentation order and is preserved from generation
/// through storage and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Course name as stated in the syllabus
    pub course_name: String,
    /// Ordered, non-empty list of units
    pub units: Vec<Unit>,
}

/// A course record before it has been persisted
///
/// The store assigns `id` and `created_at` on insert.
#[derive(Debug, Clone)]
pub struct NewCourseRecord {
    /// Human-entered course name; all read paths look records up by it
    pub name: String,
    /// Submitter's stated career interest
    pub career_interest: String,
    /// Submitter's stated expertise level
    pub expertise: String,
    /// Extracted objective document text
    pub objective: String,
    /// Validated roadmap
    pub roadmap: Roadmap,
}

/// Persisted course record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Store-assigned identity
    pub id: Uuid,
    /// Human-entered course name used at ingestion time
    pub name: String,
    /// Submitter's stated career interest
    pub career_interest: String,
    /// Submitter's stated expertise level
    pub expertise: String,
    /// Extracted objective document text
    pub objective: String,
    /// Validated roadmap
    pub roadmap: Roadmap,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
}

/// Validated ingestion inputs handed to the ingestion service
#[derive(Debug, Clone)]
pub struct IngestForm {
    /// Course name
    pub name: String,
    /// Career interest
    pub career_interest: String,
    /// Expertise level
    pub expertise: String,
    /// Path to the spooled objective document
    pub objective_path: PathBuf,
    /// Path to the spooled syllabus document
    pub syllabus_path: PathBuf,
}

/// Result of a successful ingestion
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    /// Course name taken from the validated roadmap
    pub course_name: String,
}

impl Roadmap {
    /// Total topic count across all units
    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|u| u.topics.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_count_sums_across_units() {
        let roadmap = Roadmap {
            course_name: "OS".to_string(),
            units: vec![
                Unit {
                    unit_number: "1".to_string(),
                    unit_title: "Intro".to_string(),
                    topics: vec!["Processes".to_string(), "Threads".to_string()],
                },
                Unit {
                    unit_number: "2".to_string(),
                    unit_title: "Scheduling".to_string(),
                    topics: vec!["Round Robin".to_string()],
                },
            ],
        };
        assert_eq!(roadmap.topic_count(), 3);
    }
}
