//! Live player stats from the ESPN public site API
//!
//! Polls each league's scoreboard, fetches every game's summary and flattens
//! the boxscore into one [`Player`] per athlete.
//!
//! # Example
//!
//! ```no_run
//! use sweddy::feed::{EspnClient, FeedConfig};
//! use sweddy::models::League;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EspnClient::new(FeedConfig::default())?;
//!
//!     let players = client.poll_league(League::Nba, Some("20251012")).await?;
//!     println!("Found {} players", players.len());
//!
//!     Ok(())
//! }
//! ```

mod boxscore;
mod client;
mod poller;

pub use boxscore::{process_boxscore, process_nba_boxscore, process_nfl_boxscore, Boxscore};
pub use client::{EspnClient, FeedConfig, FeedError};
pub use poller::Poller;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::League;

/// Team info as reported in the boxscore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Latest stat line for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub league: League,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot: Option<String>,
    /// Raw provider values keyed by stat key, e.g. `"receiving_YDS" -> "87"`
    pub stats: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    /// Unix millis of the poll that produced this line
    pub updated_at: i64,
}

impl Player {
    /// Cache key: lower-cased display name
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}
