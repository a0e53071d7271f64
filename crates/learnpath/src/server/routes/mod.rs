//! API routes for the roadmap server

pub mod content;
pub mod courses;
pub mod ingest;
pub mod video;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/submit-form",
            post(ingest::submit_form).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Read paths
        .route("/api/roadmap", get(courses::get_roadmap))
        .route("/api/objective", get(courses::get_objective))
        // Enrichment
        .route("/generate-content", post(content::generate_content))
        .route("/explain", post(content::explain_text))
        .route("/translate", post(content::translate_text))
        .route("/api/video", get(video::get_video))
        // Info
        .route("/api/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "learnpath",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Course roadmap generator with document-grounded generation",
        "endpoints": {
            "POST /submit-form": "Upload course documents and generate a roadmap",
            "GET /api/roadmap": "Roadmap for a course (by name)",
            "GET /api/objective": "Objective text for a course (by name)",
            "POST /generate-content": "Generate syllabus-section content",
            "POST /explain": "Explain a passage of text",
            "POST /translate": "Translate text to a target language",
            "GET /api/video": "First matching video for a topic"
        }
    }))
}
