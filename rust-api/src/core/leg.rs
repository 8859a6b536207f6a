//! Per-leg progress
//!
//! Over legs measure how many blocks remain until the goal is reached.
//! Under legs measure their safety margin: how many blocks the stat can
//! still grow before the leg breaks.

use serde::{Deserialize, Serialize};

use super::stat_blocks::block_size_of;
use crate::models::{Direction, EnrichedLeg};

/// Settlement state of a single leg at this snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegState {
    /// Outcome still open
    Pending,
    /// Over leg whose goal is met
    Hit,
    /// Under leg whose line has been reached
    Busted,
}

/// Settlement state of a leg
pub fn leg_state(leg: &EnrichedLeg) -> LegState {
    let reached = leg.current >= leg.leg.goal;
    match (leg.leg.over_or_under, reached) {
        (Direction::Over, true) => LegState::Hit,
        (Direction::Under, true) => LegState::Busted,
        _ => LegState::Pending,
    }
}

/// Normalized distance for one leg, in blocks
///
/// * over: blocks still needed, 0 once the goal is met
/// * under: safety margin in blocks, 0 once the leg is busted
pub fn remaining_distance(leg: &EnrichedLeg) -> f64 {
    let block = block_size_of(&leg.leg.stat);
    let gap = leg.leg.goal - leg.current;

    match leg.leg.over_or_under {
        Direction::Over => gap.max(0.0) / block,
        Direction::Under => {
            if gap <= 0.0 {
                0.0
            } else {
                gap / block
            }
        }
    }
}

/// Percent of the goal reached, clamped to 0..=100
pub fn progress_pct(leg: &EnrichedLeg) -> f64 {
    if leg.leg.goal <= 0.0 {
        return 0.0;
    }
    (leg.current / leg.leg.goal * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
pub(crate) fn test_leg(stat: &str, goal: f64, direction: Direction, current: f64) -> EnrichedLeg {
    use crate::models::{BetLeg, League};

    EnrichedLeg {
        leg: BetLeg {
            player: "Test Player".to_string(),
            stat: stat.to_string(),
            goal,
            over_or_under: direction,
            league: League::Nba,
        },
        current,
        player_active: true,
        headshot: None,
        team_logo: None,
    }
}
