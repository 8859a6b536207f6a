//! Sweat ranking
//!
//! Each undecided bet gets one comparable "distance to its next outcome":
//!
//! * over pressure: total blocks still needed across all over legs (every
//!   over must clear, so distances add up)
//! * under pressure: smallest safety margin across under legs (the weakest
//!   leg decides the ticket)
//!
//! When both apply, the nearer one drives the score, except that under
//! danger is ignored once the overs are [`OVER_POTENTIAL_THRESHOLD`] or more
//! blocks away: a ticket with no realistic shot at winning is not "in
//! danger" of losing.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use super::leg::remaining_distance;
use super::outcome::{classify, BetStatus};
use crate::models::{Direction, EnrichedBet};

/// Over distance at or above which a bet has no realistic winning potential
pub const OVER_POTENTIAL_THRESHOLD: f64 = 5.0;

/// Sort distance below which an active bet is flagged
pub const SWEAT_ALERT_THRESHOLD: f64 = 3.0;

/// Which pressure drives a bet's sort distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Over,
    Under,
    None,
}

/// Distances in blocks. `f64::INFINITY` means "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweatInfo {
    #[serde(serialize_with = "finite_or_null")]
    pub over_distance: f64,
    #[serde(serialize_with = "finite_or_null")]
    pub under_distance: f64,
    #[serde(serialize_with = "finite_or_null")]
    pub sort_distance: f64,
    pub sort_type: SortType,
}

/// Highlight for an active bet close to an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweatAlert {
    /// Close to hitting
    Hot,
    /// Close to losing
    Danger,
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

/// Compute over/under pressure and pick the driver
pub fn sweat_info(bet: &EnrichedBet) -> SweatInfo {
    let mut over_total = 0.0;
    let mut has_overs = false;
    let mut min_under = f64::INFINITY;
    let mut has_unders = false;

    for leg in &bet.legs {
        let distance = remaining_distance(leg);
        match leg.leg.over_or_under {
            Direction::Over => {
                has_overs = true;
                over_total += distance;
            }
            Direction::Under => {
                has_unders = true;
                min_under = min_under.min(distance);
            }
        }
    }

    let over_distance = if has_overs { over_total } else { f64::INFINITY };
    let under_distance = if has_unders { min_under } else { f64::INFINITY };

    let (sort_distance, sort_type) = match (has_overs, has_unders) {
        (false, false) => (f64::INFINITY, SortType::None),
        (true, false) => (over_distance, SortType::Over),
        (false, true) => (under_distance, SortType::Under),
        (true, true) => {
            if over_distance <= under_distance {
                (over_distance, SortType::Over)
            } else if over_distance < OVER_POTENTIAL_THRESHOLD {
                (under_distance, SortType::Under)
            } else {
                (over_distance, SortType::Over)
            }
        }
    };

    SweatInfo {
        over_distance,
        under_distance,
        sort_distance,
        sort_type,
    }
}

/// Alert for a bet, if it is active and close to its driving outcome
pub fn sweat_alert(status: BetStatus, info: &SweatInfo) -> Option<SweatAlert> {
    if status != BetStatus::Active || info.sort_distance >= SWEAT_ALERT_THRESHOLD {
        return None;
    }
    match info.sort_type {
        SortType::Over => Some(SweatAlert::Hot),
        SortType::Under => Some(SweatAlert::Danger),
        SortType::None => None,
    }
}

/// Order bets: active (closest first), then won, then lost
///
/// Stable within each bucket.
pub fn rank_bets(bets: Vec<EnrichedBet>) -> Vec<EnrichedBet> {
    let mut active: Vec<(f64, EnrichedBet)> = Vec::new();
    let mut won = Vec::new();
    let mut lost = Vec::new();

    for bet in bets {
        match classify(&bet) {
            BetStatus::Active => active.push((sweat_info(&bet).sort_distance, bet)),
            BetStatus::Won => won.push(bet),
            BetStatus::Lost => lost.push(bet),
        }
    }

    // sort_by is stable; distances are never NaN for valid goals
    active.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    active
        .into_iter()
        .map(|(_, bet)| bet)
        .chain(won)
        .chain(lost)
        .collect()
}
