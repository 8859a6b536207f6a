//! HTTP client with retry for the ESPN site API

use super::boxscore::{process_boxscore, SummaryResponse};
use super::Player;
use crate::models::League;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to fetch {url} after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

/// Feed client configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Max attempts per request
    pub max_retries: u32,
    /// Base delay between attempts in milliseconds
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 500,
            user_agent: concat!("sweddy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    #[serde(default)]
    id: String,
    #[serde(default)]
    short_name: String,
}

/// ESPN site API client
pub struct EspnClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl EspnClient {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    fn scoreboard_url(&self, league: League, date: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}/{}/scoreboard",
            self.config.base_url,
            league.sport(),
            league
        );
        if let Some(date) = date {
            url.push_str("?dates=");
            url.push_str(date);
        }
        url
    }

    fn summary_url(&self, league: League, event_id: &str) -> String {
        format!(
            "{}/{}/{}/summary?event={}",
            self.config.base_url,
            league.sport(),
            league,
            event_id
        )
    }

    /// GET and decode JSON, retrying with linear backoff
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        for attempt in 0..self.config.max_retries {
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    let body = response.bytes().await?;
                    return Ok(serde_json::from_slice(&body)?);
                }
                Ok(response) => {
                    tracing::warn!(
                        "Request failed with status {} (attempt {}/{})",
                        response.status(),
                        attempt + 1,
                        self.config.max_retries
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Request failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.config.max_retries,
                        e
                    );
                }
            }

            if attempt + 1 < self.config.max_retries {
                let backoff =
                    Duration::from_millis(self.config.retry_delay_ms * (attempt as u64 + 1));
                tokio::time::sleep(backoff).await;
            }
        }

        Err(FeedError::Exhausted {
            url: url.to_string(),
            attempts: self.config.max_retries,
        })
    }

    /// Poll every game on the league's scoreboard and flatten their boxscores
    ///
    /// A game whose summary fails is logged and skipped.
    pub async fn poll_league(
        &self,
        league: League,
        date: Option<&str>,
    ) -> Result<Vec<Player>, FeedError> {
        let url = self.scoreboard_url(league, date);
        tracing::debug!("Fetching scoreboard: {}", url);

        let scoreboard: ScoreboardResponse = self.fetch_json(&url).await?;
        let mut players = Vec::new();

        for event in scoreboard.events {
            if event.id.is_empty() {
                tracing::warn!("Skipping {} event without id", league);
                continue;
            }

            tracing::info!("Fetching summary for game {}", event.short_name);
            let summary: SummaryResponse =
                match self.fetch_json(&self.summary_url(league, &event.id)).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        tracing::warn!("Summary failed for {}: {}", event.short_name, e);
                        continue;
                    }
                };

            let Some(box_score) = summary.boxscore else {
                tracing::info!("No boxscore yet for {}", event.short_name);
                continue;
            };

            let game_players = process_boxscore(league, &box_score, Utc::now().timestamp_millis());
            tracing::debug!("{} players from {}", game_players.len(), event.short_name);
            players.extend(game_players);
        }

        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = FeedConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn test_scoreboard_url() {
        let client = EspnClient::new(FeedConfig::default()).unwrap();
        assert_eq!(
            client.scoreboard_url(League::Nba, None),
            "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/scoreboard"
        );
        assert_eq!(
            client.scoreboard_url(League::Nfl, Some("20251012")),
            "https://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard?dates=20251012"
        );
    }

    #[test]
    fn test_summary_url() {
        let client = EspnClient::new(FeedConfig::default()).unwrap();
        assert_eq!(
            client.summary_url(League::Nfl, "401772510"),
            "https://site.api.espn.com/apis/site/v2/sports/football/nfl/summary?event=401772510"
        );
    }

    #[test]
    fn test_scoreboard_decode_tolerates_missing_fields() {
        let sb: ScoreboardResponse =
            serde_json::from_str(r#"{"events": [{"id": "1", "shortName": "GB @ CIN"}, {}]}"#)
                .unwrap();
        assert_eq!(sb.events.len(), 2);
        assert_eq!(sb.events[0].short_name, "GB @ CIN");
        assert!(sb.events[1].id.is_empty());

        let empty: ScoreboardResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.events.is_empty());
    }
}
