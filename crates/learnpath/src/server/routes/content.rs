//! Ancillary generation endpoints: syllabus content, explanation, translation
//!
//! These reuse the generative backend's one-shot call and its error
//! taxonomy. Failures come back as structured errors, never as an error
//! string inside a success field.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::roadmap::prompt;
use crate::server::state::AppState;

/// Request body for POST /generate-content
#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    /// Learning objectives to cover
    #[serde(default)]
    pub objective: String,
    /// Topic title to expand
    #[serde(default, rename = "selectedTopic")]
    pub selected_topic: String,
}

/// POST /generate-content - Generate a syllabus section for a topic
pub async fn generate_content(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<serde_json::Value>> {
    if request.selected_topic.trim().is_empty() {
        return Err(Error::invalid_input("No topic provided"));
    }

    let prompt = prompt::syllabus_content(&request.objective, &request.selected_topic);
    let content = state.generative().generate_text(&prompt).await?;

    Ok(Json(json!({ "content": content })))
}

/// Request body for POST /explain
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    /// Text to explain
    #[serde(default)]
    pub text: String,
}

/// POST /explain - Explain a passage of course text
pub async fn explain_text(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<serde_json::Value>> {
    if request.text.trim().is_empty() {
        return Err(Error::invalid_input("No text provided"));
    }

    let explanation = state
        .generative()
        .generate_text(&prompt::explanation(&request.text))
        .await?;

    Ok(Json(json!({ "explanation": explanation })))
}

/// Request body for POST /translate
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    #[serde(default)]
    pub text: String,
    /// Target language
    #[serde(default)]
    pub language: String,
}

/// POST /translate - Translate course text to a target language
pub async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<serde_json::Value>> {
    if request.text.trim().is_empty() || request.language.trim().is_empty() {
        return Err(Error::invalid_input("Text or language not provided"));
    }

    let translation = state
        .generative()
        .generate_text(&prompt::translation(&request.text, &request.language))
        .await?;

    Ok(Json(json!({ "translation": translation.trim() })))
}
