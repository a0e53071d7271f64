//! HTTP server for the roadmap service

pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Roadmap HTTP server
pub struct Server {
    config: AppConfig,
    state: AppState,
}

impl Server {
    /// Create a new server
    pub fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server over pre-built state (tests)
    pub fn with_state(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router with all routes
    fn build_router(&self) -> Router {
        // CORS layer - must be added first (outermost)
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(health_check))
            .merge(routes::routes(self.config.server.max_upload_size))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting roadmap server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result as CrateResult};
    use crate::providers::{GenerativeProvider, VideoSearchProvider};
    use crate::storage::{CourseRepository, SqliteCourseStore};
    use crate::types::{NewCourseRecord, Roadmap, Unit};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubGenerative;

    #[async_trait]
    impl GenerativeProvider for StubGenerative {
        async fn generate_roadmap(&self, _document_path: &Path) -> CrateResult<String> {
            Ok(r#"{"roadMap":{"course_name":"OS","roadmap":[{"unit_number":"1","unit_title":"Intro","topics":["Processes"]}]}}"#.to_string())
        }

        async fn generate_text(&self, _prompt: &str) -> CrateResult<String> {
            Ok("generated text".to_string())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    struct StubVideo;

    #[async_trait]
    impl VideoSearchProvider for StubVideo {
        async fn find_first_video(&self, topic: &str) -> CrateResult<String> {
            if topic == "Processes" {
                Ok("https://www.youtube.com/watch?v=abc123".to_string())
            } else {
                Err(Error::not_found(format!("No videos found for topic: {}", topic)))
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    async fn test_server() -> Server {
        let repository = Arc::new(SqliteCourseStore::in_memory().unwrap());
        repository
            .save(NewCourseRecord {
                name: "Alice".to_string(),
                career_interest: "Systems".to_string(),
                expertise: "Beginner".to_string(),
                objective: "Understand operating systems".to_string(),
                roadmap: Roadmap {
                    course_name: "OS".to_string(),
                    units: vec![Unit {
                        unit_number: "1".to_string(),
                        unit_title: "Intro".to_string(),
                        topics: vec!["Processes".to_string()],
                    }],
                },
            })
            .await
            .unwrap();

        let config = AppConfig::default();
        let state = AppState::with_providers(
            config.clone(),
            repository,
            Arc::new(StubGenerative),
            Arc::new(StubVideo),
        );
        Server::with_state(config, state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn roadmap_read_returns_stored_roadmap() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(
                Request::get("/api/roadmap?name=Alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["course_name"], "OS");
        assert_eq!(body["roadmap"]["units"][0]["topics"][0], "Processes");
    }

    #[tokio::test]
    async fn padded_query_name_still_finds_the_course() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(
                Request::get("/api/roadmap?name=%20Alice%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_course_is_structured_not_found() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(
                Request::get("/api/objective?name=Unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "not_found");
    }

    #[tokio::test]
    async fn video_lookup_round_trips_through_router() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(
                Request::get("/api/video?topic=Processes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["video_url"], "https://www.youtube.com/watch?v=abc123");
    }

    #[tokio::test]
    async fn explain_rejects_empty_text() {
        let router = test_server().await.build_router();
        let response = router
            .oneshot(
                Request::post("/explain")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_input");
    }
}
