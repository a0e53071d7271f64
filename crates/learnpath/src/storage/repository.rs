//! SQLite-backed course repository
//!
//! The repository exclusively owns the persisted representation; callers
//! hand it a validated [`NewCourseRecord`] and read back [`CourseRecord`]s
//! by the human-entered course name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{CourseRecord, NewCourseRecord, Roadmap};

/// Trait for course record persistence
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert one record, returning the assigned identity
    ///
    /// No uniqueness constraint on `name`; duplicate names accumulate.
    async fn save(&self, record: NewCourseRecord) -> Result<Uuid>;

    /// Return the first (oldest) record whose name matches exactly
    async fn find_by_course_name(&self, name: &str) -> Result<CourseRecord>;
}

/// SQLite-based course store
pub struct SqliteCourseStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCourseStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::storage(format!("Failed to open database: {}", e)))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to open in-memory database: {}", e)))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                career_interest TEXT NOT NULL,
                expertise TEXT NOT NULL,
                objective TEXT NOT NULL,
                roadmap TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_courses_name ON courses(name);
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<(CourseRecord, String)> {
        let id: String = row.get(0)?;
        let roadmap_json: String = row.get(5)?;
        let created_at: String = row.get(6)?;
        Ok((
            CourseRecord {
                id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::nil()),
                name: row.get(1)?,
                career_interest: row.get(2)?,
                expertise: row.get(3)?,
                objective: row.get(4)?,
                // Filled in by the caller from roadmap_json
                roadmap: Roadmap {
                    course_name: String::new(),
                    units: Vec::new(),
                },
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            },
            roadmap_json,
        ))
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseStore {
    async fn save(&self, record: NewCourseRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let roadmap_json = serde_json::to_string(&record.roadmap)
            .map_err(|e| Error::storage(format!("Failed to serialize roadmap: {}", e)))?;

        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO courses (id, name, career_interest, expertise, objective, roadmap, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
            params![
                id.to_string(),
                record.name,
                record.career_interest,
                record.expertise,
                record.objective,
                roadmap_json,
                created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::storage(format!("Failed to insert course: {}", e)))?;

        tracing::info!("Saved course record '{}' as {}", record.name, id);
        Ok(id)
    }

    async fn find_by_course_name(&self, name: &str) -> Result<CourseRecord> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                r#"
                SELECT id, name, career_interest, expertise, objective, roadmap, created_at
                FROM courses
                WHERE name = ?1
                ORDER BY rowid ASC
                LIMIT 1
            "#,
                params![name],
                Self::row_to_record,
            )
            .optional()
            .map_err(|e| Error::storage(format!("Failed to query course: {}", e)))?;

        let (mut record, roadmap_json) = row.ok_or_else(|| {
            Error::not_found(format!("No roadmap available for course: {}", name))
        })?;

        record.roadmap = serde_json::from_str(&roadmap_json)
            .map_err(|e| Error::storage(format!("Corrupt roadmap column: {}", e)))?;

        Ok(record)
    }
}
