//! Boxscore flattening
//!
//! NBA summaries carry a single stat table per team with bare column names
//! (`PTS`, `REB`). NFL summaries carry one table per category, so keys are
//! prefixed with the category (`passing_YDS`) and an athlete appearing in
//! several tables is merged into one player.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use super::{Player, Team};
use crate::models::League;

/// `summary` response, only the parts we read
#[derive(Debug, Deserialize)]
pub(crate) struct SummaryResponse {
    #[serde(default)]
    pub boxscore: Option<Boxscore>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Boxscore {
    #[serde(default)]
    pub players: Vec<TeamBoxscore>,
}

#[derive(Debug, Deserialize)]
pub struct TeamBoxscore {
    #[serde(default)]
    pub team: Team,
    #[serde(default)]
    pub statistics: Vec<StatTable>,
}

#[derive(Debug, Deserialize)]
pub struct StatTable {
    /// Category name (NFL only)
    #[serde(default)]
    pub name: Option<String>,
    /// Column keys (NBA)
    #[serde(default)]
    pub names: Vec<String>,
    /// Column labels (NFL)
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Deserialize)]
pub struct AthleteLine {
    #[serde(default)]
    pub athlete: Option<Athlete>,
    #[serde(default)]
    pub stats: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub headshot: Option<Headshot>,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Deserialize)]
pub struct Headshot {
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct Position {
    pub abbreviation: String,
}

fn new_player(athlete: &Athlete, name: &str, league: League, team: &Team, now_ms: i64) -> Player {
    Player {
        id: athlete.id.clone(),
        name: name.to_string(),
        league,
        position: athlete.position.as_ref().map(|p| p.abbreviation.clone()),
        headshot: athlete.headshot.as_ref().map(|h| h.href.clone()),
        stats: BTreeMap::new(),
        team: Some(team.clone()),
        updated_at: now_ms,
    }
}

/// Flatten an NBA boxscore
pub fn process_nba_boxscore(box_score: &Boxscore, now_ms: i64) -> Vec<Player> {
    // Column names come from the first team's table
    let descriptors: &[String] = box_score
        .players
        .first()
        .and_then(|t| t.statistics.first())
        .map(|s| s.names.as_slice())
        .unwrap_or(&[]);

    let mut players = Vec::new();

    for team_box in &box_score.players {
        let Some(table) = team_box.statistics.first() else {
            continue;
        };

        for line in &table.athletes {
            let Some(athlete) = &line.athlete else {
                continue;
            };
            let Some(name) = athlete.display_name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            if line.stats.is_empty() {
                continue;
            }

            let mut player = new_player(athlete, name, League::Nba, &team_box.team, now_ms);
            for (i, value) in line.stats.iter().enumerate() {
                let label = descriptors
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("col{}", i));
                player.stats.insert(label, value.clone());
            }
            players.push(player);
        }
    }

    players
}

/// Flatten an NFL boxscore
pub fn process_nfl_boxscore(box_score: &Boxscore, now_ms: i64) -> Vec<Player> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Player> = HashMap::new();

    for team_box in &box_score.players {
        for table in &team_box.statistics {
            let category = table.name.as_deref().unwrap_or_default();

            for line in &table.athletes {
                let Some(athlete) = &line.athlete else {
                    continue;
                };
                let Some(name) = athlete.display_name.as_deref().filter(|n| !n.is_empty()) else {
                    continue;
                };

                let key = name.to_lowercase();
                let player = by_key.entry(key.clone()).or_insert_with(|| {
                    order.push(key);
                    new_player(athlete, name, League::Nfl, &team_box.team, now_ms)
                });

                for (label, value) in table.labels.iter().zip(line.stats.iter()) {
                    if label.is_empty() {
                        continue;
                    }
                    player
                        .stats
                        .insert(format!("{}_{}", category, label), value.clone());
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}

/// Flatten a boxscore according to its league's layout
pub fn process_boxscore(league: League, box_score: &Boxscore, now_ms: i64) -> Vec<Player> {
    match league {
        League::Nba => process_nba_boxscore(box_score, now_ms),
        League::Nfl => process_nfl_boxscore(box_score, now_ms),
    }
}
