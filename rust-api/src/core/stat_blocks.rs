//! Stat block sizes
//!
//! A block is "one unit of meaningful progress" for a stat. Dividing a raw
//! gap by the block size makes gaps comparable across stats: 25 passing
//! yards count the same as a single reception.
//!
//! NFL keys carry their boxscore category as a prefix (`receiving_REC`),
//! NBA keys are bare (`PTS`). Both live in one flat table.

use crate::models::League;

/// Block size used for any stat missing from the table
pub const DEFAULT_BLOCK_SIZE: f64 = 1.0;

pub const NFL_STAT_BLOCKS: &[(&str, f64)] = &[
    // Passing
    ("passing_YDS", 25.0),
    ("passing_TD", 1.0),
    ("passing_INT", 1.0),
    ("passing_SACKS", 1.0),
    // Rushing
    ("rushing_YDS", 10.0),
    ("rushing_TD", 1.0),
    ("rushing_CAR", 5.0),
    // Receiving
    ("receiving_YDS", 15.0),
    ("receiving_REC", 1.0),
    ("receiving_TD", 1.0),
    ("receiving_TGTS", 2.0),
    // Defensive
    ("defensive_SACKS", 1.0),
    ("defensive_QB HTS", 1.0),
    ("defensive_TD", 1.0),
    // Interceptions
    ("interceptions_INT", 1.0),
    ("interceptions_YDS", 15.0),
    ("interceptions_TD", 1.0),
    // Fumbles
    ("fumbles_FUM", 1.0),
    ("fumbles_LOST", 1.0),
    ("fumbles_REC", 1.0),
    // Kick returns
    ("kickReturns_NO", 1.0),
    ("kickReturns_YDS", 20.0),
    ("kickReturns_TD", 1.0),
    // Punt returns
    ("puntReturns_NO", 1.0),
    ("puntReturns_YDS", 15.0),
    ("puntReturns_TD", 1.0),
    // Kicking
    ("kicking_FG", 1.0),
    ("kicking_XP", 1.0),
    ("kicking_PTS", 3.0),
    // Punting
    ("punting_NO", 2.0),
    ("punting_YDS", 30.0),
    ("punting_TB", 1.0),
    ("punting_In 20", 1.0),
];

pub const NBA_STAT_BLOCKS: &[(&str, f64)] = &[
    ("PTS", 7.0),
    ("REB", 3.0),
    ("AST", 2.0),
    ("STL", 1.0),
    ("BLK", 1.0),
    ("3PT", 1.0),
    ("FG", 2.0),
    ("FT", 3.0),
    ("TO", 1.0),
    ("OREB", 1.0),
    ("DREB", 2.0),
    ("MIN", 5.0),
];

fn table_for(league: League) -> &'static [(&'static str, f64)] {
    match league {
        League::Nfl => NFL_STAT_BLOCKS,
        League::Nba => NBA_STAT_BLOCKS,
    }
}

/// Block size for a stat key, [`DEFAULT_BLOCK_SIZE`] when unknown
///
/// # Examples
/// ```
/// use sweddy::core::stat_blocks::block_size_of;
/// assert_eq!(block_size_of("passing_YDS"), 25.0);
/// assert_eq!(block_size_of("defensive_TOT"), 1.0);
/// ```
pub fn block_size_of(stat: &str) -> f64 {
    NFL_STAT_BLOCKS
        .iter()
        .chain(NBA_STAT_BLOCKS.iter())
        .find(|(key, _)| *key == stat)
        .map(|(_, size)| *size)
        .unwrap_or(DEFAULT_BLOCK_SIZE)
}

/// Known stat keys for a league, sorted
pub fn stats_for_league(league: League) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = table_for(league).iter().map(|(key, _)| *key).collect();
    keys.sort_unstable();
    keys
}

/// Display label: `passing_YDS` -> `Passing YDS`
pub fn format_stat_label(stat: &str) -> String {
    let label = stat.replace('_', " ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
