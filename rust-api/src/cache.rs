//! Live player stat cache
//!
//! Keeps the latest [`Player`] per lower-cased display name. The poller
//! writes, request handlers read; lookups go through the [`StatSource`]
//! trait so enrichment can run against any source.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::feed::Player;
use crate::models::{League, PlayerSearchResult};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 50;

/// What enrichment needs to know about one player
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatSnapshot {
    pub stats: BTreeMap<String, String>,
    pub headshot: Option<String>,
    pub team_logo: Option<String>,
}

/// Source of live stats keyed by free-text player name
pub trait StatSource {
    fn lookup(&self, player: &str) -> Option<StatSnapshot>;
}

/// Shared cache of the latest stat line per player
#[derive(Debug, Default)]
pub struct PlayerCache {
    players: RwLock<HashMap<String, Player>>,
}

impl PlayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        let cache = Self::new();
        cache.upsert_many(players);
        cache
    }

    /// Load a snapshot written by [`PlayerCache::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let players: Vec<Player> = serde_json::from_str(&content)?;
        Ok(Self::from_players(players))
    }

    /// Write all cached players as a JSON array
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.players())?;
        fs::write(path, json)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Player>> {
        self.players.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Player>> {
        self.players.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace each player's snapshot wholesale
    pub fn upsert_many(&self, players: Vec<Player>) {
        let mut map = self.write();
        for player in players {
            map.insert(player.key(), player);
        }
    }

    pub fn get(&self, name: &str) -> Option<Player> {
        self.read().get(&name.to_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All players, sorted by name
    pub fn players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.read().values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    /// Case-insensitive name search
    ///
    /// Scores: 0 exact, 1 name prefix, 2 word prefix, 3 substring.
    pub fn search(&self, query: &str, league: Option<League>, limit: usize) -> Vec<PlayerSearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<PlayerSearchResult> = self
            .read()
            .iter()
            .filter(|(_, player)| league.map_or(true, |l| player.league == l))
            .filter_map(|(key, player)| {
                match_score(key, &needle).map(|score| PlayerSearchResult {
                    name: player.name.clone(),
                    league: player.league,
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.name.cmp(&b.name)));
        hits.truncate(limit.min(MAX_SEARCH_LIMIT));
        hits
    }
}

fn match_score(name: &str, needle: &str) -> Option<u8> {
    if name == needle {
        Some(0)
    } else if name.starts_with(needle) {
        Some(1)
    } else if name.split_whitespace().any(|word| word.starts_with(needle)) {
        Some(2)
    } else if name.contains(needle) {
        Some(3)
    } else {
        None
    }
}

impl StatSource for PlayerCache {
    fn lookup(&self, player: &str) -> Option<StatSnapshot> {
        self.read()
            .get(&player.to_lowercase())
            .map(|p| StatSnapshot {
                stats: p.stats.clone(),
                headshot: p.headshot.clone(),
                team_logo: p.team.as_ref().and_then(|t| t.logo.clone()),
            })
    }
}

#[cfg(test)]
pub(crate) fn test_player(name: &str, league: League, stats: &[(&str, &str)]) -> Player {
    Player {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        league,
        position: None,
        headshot: None,
        stats: stats
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        team: None,
        updated_at: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Team;
    use tempfile::NamedTempFile;

    fn sample_cache() -> PlayerCache {
        PlayerCache::from_players(vec![
            test_player("Josh Jacobs", League::Nfl, &[("rushing_YDS", "73")]),
            test_player("Josh Allen", League::Nfl, &[("passing_YDS", "301")]),
            test_player("Josh Giddey", League::Nba, &[("AST", "9")]),
            test_player("Jalen Johnson", League::Nba, &[("PTS", "22")]),
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let cache = sample_cache();
        let snapshot = cache.lookup("JOSH jacobs").unwrap();
        assert_eq!(snapshot.stats.get("rushing_YDS").map(String::as_str), Some("73"));
        assert!(cache.lookup("Josh Jacob").is_none());
    }

    #[test]
    fn test_lookup_carries_team_logo() {
        let mut player = test_player("Tee Higgins", League::Nfl, &[]);
        player.team = Some(Team {
            logo: Some("cin.png".to_string()),
            ..Team::default()
        });
        player.headshot = Some("tee.png".to_string());
        let cache = PlayerCache::from_players(vec![player]);

        let snapshot = cache.lookup("tee higgins").unwrap();
        assert_eq!(snapshot.team_logo.as_deref(), Some("cin.png"));
        assert_eq!(snapshot.headshot.as_deref(), Some("tee.png"));
    }

    #[test]
    fn test_upsert_replaces_snapshot() {
        let cache = sample_cache();
        cache.upsert_many(vec![test_player("Josh Jacobs", League::Nfl, &[("rushing_TD", "1")])]);

        let jacobs = cache.get("josh jacobs").unwrap();
        assert_eq!(jacobs.stats.len(), 1);
        assert!(jacobs.stats.contains_key("rushing_TD"));
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_search_scoring_and_filter() {
        let cache = sample_cache();

        let hits = cache.search("josh", None, DEFAULT_SEARCH_LIMIT);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Josh Allen", "Josh Giddey", "Josh Jacobs"]);
        assert!(hits.iter().all(|h| h.score == 1));

        let nba = cache.search("josh", Some(League::Nba), DEFAULT_SEARCH_LIMIT);
        assert_eq!(nba.len(), 1);
        assert_eq!(nba[0].name, "Josh Giddey");

        let word = cache.search("johnson", None, DEFAULT_SEARCH_LIMIT);
        assert_eq!(word[0].score, 2);

        let exact = cache.search("Josh Allen", None, DEFAULT_SEARCH_LIMIT);
        assert_eq!(exact[0].score, 0);

        let inner = cache.search("idde", None, DEFAULT_SEARCH_LIMIT);
        assert_eq!(inner[0].score, 3);
    }

    #[test]
    fn test_search_blank_and_limit() {
        let cache = sample_cache();
        assert!(cache.search("   ", None, 10).is_empty());
        assert_eq!(cache.search("j", None, 2).len(), 2);
    }

    #[test]
    fn test_save_and_load_snapshot() {
        let cache = sample_cache();
        let temp = NamedTempFile::new().unwrap();
        cache.save(temp.path()).unwrap();

        let loaded = PlayerCache::load(temp.path()).unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.players(), cache.players());
    }
}
