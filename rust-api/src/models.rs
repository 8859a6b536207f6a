use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{BetStatus, SweatAlert, SweatInfo};

/// Which side of the line a leg is betting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Over,
    Under,
}

/// Supported leagues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nfl,
    Nba,
}

impl League {
    pub const ALL: [League; 2] = [League::Nba, League::Nfl];

    /// Sport segment used by the stats provider URLs
    pub fn sport(&self) -> &'static str {
        match self {
            League::Nfl => "football",
            League::Nba => "basketball",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            other => Err(format!("unknown league: {}", other)),
        }
    }
}

/// One over/under prediction within a parlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetLeg {
    pub player: String,
    pub stat: String,
    pub goal: f64,
    pub over_or_under: Direction,
    pub league: League,
}

/// Stored parlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    pub legs: Vec<BetLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_amount: Option<f64>,
}

/// Leg with its live stat value attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLeg {
    #[serde(flatten)]
    pub leg: BetLeg,
    pub current: f64,
    pub player_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_logo: Option<String>,
}

/// Bet whose legs carry live values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBet {
    pub id: String,
    pub legs: Vec<EnrichedLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_amount: Option<f64>,
}

/// Create/update request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    pub legs: Vec<BetLeg>,
    #[serde(default)]
    pub bet_amount: Option<f64>,
    #[serde(default)]
    pub payout_amount: Option<f64>,
}

/// Dashboard row: enriched bet plus its derived status and sweat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetView {
    #[serde(flatten)]
    pub bet: EnrichedBet,
    pub status: BetStatus,
    pub sweat: SweatInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<SweatAlert>,
}

/// Player search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSearchResult {
    pub name: String,
    pub league: League,
    pub score: u8,
}

/// Player search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPlayersResponse {
    pub players: Vec<PlayerSearchResult>,
    pub total: usize,
}

/// Stat catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    pub key: String,
    pub label: String,
    pub block_size: f64,
}

/// Stat catalog response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub league: League,
    pub stats: Vec<StatEntry>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_players: usize,
}

/// Delete acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_wire_format() {
        let json = r#"{
            "id": "bet-1",
            "betAmount": 10,
            "legs": [
                {"player": "Myles Turner", "stat": "BLK", "goal": 1, "overOrUnder": "over", "league": "nba"}
            ]
        }"#;

        let bet: Bet = serde_json::from_str(json).unwrap();
        assert_eq!(bet.bet_amount, Some(10.0));
        assert_eq!(bet.payout_amount, None);
        assert_eq!(bet.legs[0].over_or_under, Direction::Over);
        assert_eq!(bet.legs[0].league, League::Nba);

        let out = serde_json::to_value(&bet).unwrap();
        assert!(out.get("payoutAmount").is_none());
        assert_eq!(out["legs"][0]["overOrUnder"], "over");
    }

    #[test]
    fn test_enriched_leg_flattens_static_fields() {
        let leg = EnrichedLeg {
            leg: BetLeg {
                player: "Josh Jacobs".to_string(),
                stat: "rushing_YDS".to_string(),
                goal: 80.0,
                over_or_under: Direction::Under,
                league: League::Nfl,
            },
            current: 42.0,
            player_active: true,
            headshot: None,
            team_logo: Some("logo.png".to_string()),
        };

        let out = serde_json::to_value(&leg).unwrap();
        assert_eq!(out["stat"], "rushing_YDS");
        assert_eq!(out["current"], 42.0);
        assert_eq!(out["playerActive"], true);
        assert_eq!(out["teamLogo"], "logo.png");
        assert!(out.get("headshot").is_none());
    }

    #[test]
    fn test_league_parsing() {
        assert_eq!("NFL".parse::<League>(), Ok(League::Nfl));
        assert_eq!(" nba ".parse::<League>(), Ok(League::Nba));
        assert!("nhl".parse::<League>().is_err());
        assert_eq!(League::Nba.sport(), "basketball");
        assert_eq!(League::Nfl.sport(), "football");
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let json = r#"{"player": "A", "stat": "PTS", "goal": 1, "overOrUnder": "sideways", "league": "nba"}"#;
        assert!(serde_json::from_str::<BetLeg>(json).is_err());
    }
}
