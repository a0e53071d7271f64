//! Core data types shared across the service

pub mod course;

pub use course::{CourseRecord, IngestForm, IngestSummary, NewCourseRecord, Roadmap, Unit};
