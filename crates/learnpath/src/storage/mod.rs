//! Persistence layer for course records

pub mod repository;

pub use repository::{CourseRepository, SqliteCourseStore};
