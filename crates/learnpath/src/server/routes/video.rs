//! Topic video lookup endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Query parameters for video lookup
#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    /// Topic string to search for
    #[serde(default)]
    pub topic: String,
}

/// GET /api/video?topic= - First matching video for a topic
pub async fn get_video(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<serde_json::Value>> {
    let topic = query.topic.trim();
    if topic.is_empty() {
        return Err(Error::invalid_input("Topic parameter is required"));
    }

    let video_url = state.video().find_first_video(topic).await?;

    Ok(Json(json!({
        "message": format!("Video found for topic: {}", topic),
        "video_url": video_url,
    })))
}
