//! Gemini client for roadmap and free-text generation
//!
//! Wraps the generativelanguage file-upload + generateContent API with a
//! fixed configuration. Roadmap generation uploads the syllabus document,
//! polls until the backend has processed it, then issues one generation
//! request carrying the schema-describing system instruction.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::roadmap::prompt;

use super::generative::{await_file_ready, Delay, FileState, GenerativeProvider, TokioDelay};

/// Gemini client via the generativelanguage API (key-based auth)
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    delay: Arc<dyn Delay>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("http", &self.http)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Self::with_delay(config, Arc::new(TokioDelay))
    }

    /// Create with an explicit delay implementation (tests use a fake)
    pub fn with_delay(config: GeminiConfig, delay: Arc<dyn Delay>) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config(
                "Gemini API key is not set (GEMINI_API_KEY)".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            delay,
        })
    }

    fn upload_endpoint(&self) -> String {
        format!(
            "{}/upload/v1beta/files?key={}",
            self.config.base_url, self.config.api_key
        )
    }

    fn file_endpoint(&self, file_name: &str) -> String {
        format!(
            "{}/v1beta/{}?key={}",
            self.config.base_url, file_name, self.config.api_key
        )
    }

    fn generate_endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        )
    }

    /// Upload a document, returning its backend handle
    async fn upload_file(&self, path: &Path) -> Result<UploadedFile> {
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.clone())
            .mime_str("application/pdf")
            .map_err(|e| Error::backend(format!("invalid upload mime type: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .text(
                "metadata",
                serde_json::json!({ "file": { "display_name": filename } }).to_string(),
            )
            .part("file", part);

        let response = self
            .http
            .post(self.upload_endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::backend(format!("upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "upload rejected ({}): {}",
                status, body
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("failed to parse upload response: {}", e)))?;

        tracing::info!("Uploaded '{}' as {}", filename, uploaded.file.name);
        Ok(uploaded.file)
    }

    /// Fetch the current processing state of an uploaded file
    async fn fetch_file_state(&self, file_name: &str) -> Result<FileState> {
        let response = self
            .http
            .get(self.file_endpoint(file_name))
            .send()
            .await
            .map_err(|e| Error::backend(format!("file status request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::backend(format!(
                "file status request rejected ({})",
                status
            )));
        }

        let file: UploadedFile = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("failed to parse file status: {}", e)))?;

        Ok(file.state())
    }

    /// Issue one generateContent request and return its text
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String> {
        let response = self
            .http
            .post(self.generate_endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(|e| Error::backend(format!("generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("failed to parse generation response: {}", e)))?;

        gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::backend("no text in generation response".to_string()))
    }

    fn generation_config(&self, json_output: bool) -> GenerationConfig {
        GenerationConfig {
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
            max_output_tokens: self.config.max_output_tokens,
            response_mime_type: json_output.then(|| "application/json".to_string()),
        }
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn generate_roadmap(&self, document_path: &Path) -> Result<String> {
        let file = self.upload_file(document_path).await?;

        let interval = Duration::from_secs(self.config.poll_interval_secs);
        await_file_ready(
            || self.fetch_file_state(&file.name),
            self.delay.as_ref(),
            interval,
            self.config.max_poll_attempts,
        )
        .await?;

        let request = GenerateRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(prompt::ROADMAP_SYSTEM_INSTRUCTION)],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::file(&file.uri, "application/pdf"),
                    Part::text(prompt::ROADMAP_USER_MESSAGE),
                ],
            }],
            generation_config: self.generation_config(true),
        };

        self.generate(&self.config.roadmap_model, &request).await
    }

    async fn generate_text(&self, prompt_text: &str) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt_text)],
            }],
            generation_config: self.generation_config(false),
        };

        self.generate(&self.config.content_model, &request).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.roadmap_model
    }
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

/// Backend handle for an uploaded document
#[derive(Debug, Clone, serde::Deserialize)]
struct UploadedFile {
    name: String,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    state: String,
}

impl UploadedFile {
    fn state(&self) -> FileState {
        match self.state.as_str() {
            "PROCESSING" => FileState::Pending,
            "ACTIVE" => FileState::Ready,
            // STATE_UNSPECIFIED, FAILED, and anything the API grows later
            _ => FileState::Failed,
        }
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "fileData", skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    fn file(uri: &str, mime_type: &str) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                mime_type: mime_type.to_string(),
                file_uri: uri.to_string(),
            }),
        }
    }
}

#[derive(serde::Serialize)]
struct FileData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    #[serde(rename = "fileUri")]
    file_uri: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: String,
}
