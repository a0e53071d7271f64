//! Course ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::IngestForm;

/// POST /submit-form - Upload course documents and generate a roadmap
///
/// Multipart fields: `name`, `careerInterest`, `expertise`, `file1`
/// (objective document), `file2` (syllabus document).
pub async fn submit_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    // The spool dir must outlive the whole ingestion
    let spool = tempfile::tempdir()?;
    let form = read_form(multipart, spool.path()).await?;

    tracing::info!("Ingestion request for course '{}'", form.name);

    let deadline = Duration::from_secs(state.config().server.ingest_timeout_secs);
    let summary = timeout(deadline, state.ingestion().ingest(form))
        .await
        .map_err(|_| Error::DeadlineExceeded {
            seconds: deadline.as_secs(),
        })??;

    Ok(Json(json!({
        "message": "Roadmap generated successfully",
        "course_name": summary.course_name,
    })))
}

/// Read the multipart form, spooling file parts into `spool_dir`
async fn read_form(mut multipart: Multipart, spool_dir: &std::path::Path) -> Result<IngestForm> {
    let mut name = String::new();
    let mut career_interest = String::new();
    let mut expertise = String::new();
    let mut objective_path = PathBuf::new();
    let mut syllabus_path = PathBuf::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" | "careerInterest" | "expertise" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::invalid_input(format!("Failed to read field: {}", e)))?;
                match field_name.as_str() {
                    "name" => name = value,
                    "careerInterest" => career_interest = value,
                    _ => expertise = value,
                }
            }
            "file1" | "file2" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{}.pdf", field_name));
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;

                // Prefix with the field name so identically named uploads
                // cannot clobber each other
                let path = spool_dir.join(format!("{}-{}", field_name, sanitize_filename(&filename)));
                tokio::fs::write(&path, &data).await?;
                tracing::debug!("Spooled '{}' ({} bytes)", filename, data.len());

                if field_name == "file1" {
                    objective_path = path;
                } else {
                    syllabus_path = path;
                }
            }
            other => {
                tracing::debug!("Ignoring unknown multipart field '{}'", other);
            }
        }
    }

    Ok(IngestForm {
        name,
        career_interest,
        expertise,
        objective_path,
        syllabus_path,
    })
}

/// Keep only the final path component of a client-supplied filename
fn sanitize_filename(filename: &str) -> String {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload.pdf")
        .to_string()
}
