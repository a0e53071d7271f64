//! YouTube Data API video lookup

use async_trait::async_trait;

use crate::config::YouTubeConfig;
use crate::error::{Error, Result};

use super::video::VideoSearchProvider;

/// YouTube search client returning the first matching video's watch URL
pub struct YouTubeClient {
    http: reqwest::Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    /// Create a new YouTube client
    pub fn new(config: YouTubeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn search_endpoint(&self) -> String {
        format!("{}/search", self.config.base_url)
    }

    /// Map a search response to the first video's watch URL
    fn first_video_url(response: &SearchResponse, topic: &str) -> Result<String> {
        response
            .items
            .iter()
            .find_map(|item| item.id.video_id.as_deref())
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
            .ok_or_else(|| Error::not_found(format!("No videos found for topic: {}", topic)))
    }
}

#[async_trait]
impl VideoSearchProvider for YouTubeClient {
    async fn find_first_video(&self, topic: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(Error::Config(
                "YouTube API key is not set (YOUTUBE_API_KEY)".to_string(),
            ));
        }

        let response = self
            .http
            .get(self.search_endpoint())
            .query(&[
                ("part", "snippet"),
                ("q", topic),
                ("key", &self.config.api_key),
                ("maxResults", "1"),
                ("type", "video"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::internal(format!(
                "YouTube search rejected ({})",
                status
            )));
        }

        let search: SearchResponse = response.json().await?;
        Self::first_video_url(&search, topic)
    }

    fn name(&self) -> &str {
        "youtube"
    }
}

#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, serde::Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, serde::Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}
