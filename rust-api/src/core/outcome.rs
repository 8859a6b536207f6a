//! Bet classification
//!
//! One busted under leg loses the whole ticket. A ticket only counts as won
//! when every leg is an over that has already hit: an under leg is never
//! safe until its game ends, so it can only ever be active or lost here.

use serde::{Deserialize, Serialize};

use crate::models::{Direction, EnrichedBet};

/// Point-in-time outcome of a bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Active,
    Won,
    Lost,
}

/// True when any under leg has reached its line
pub fn is_guaranteed_loss(bet: &EnrichedBet) -> bool {
    bet.legs
        .iter()
        .any(|leg| leg.leg.over_or_under == Direction::Under && leg.current >= leg.leg.goal)
}

/// True when there are no under legs and every over leg has hit
pub fn is_guaranteed_win(bet: &EnrichedBet) -> bool {
    let has_unders = bet
        .legs
        .iter()
        .any(|leg| leg.leg.over_or_under == Direction::Under);
    if has_unders {
        return false;
    }

    bet.legs.iter().all(|leg| leg.current >= leg.leg.goal)
}

/// Classify a bet. Loss takes priority over win.
pub fn classify(bet: &EnrichedBet) -> BetStatus {
    if is_guaranteed_loss(bet) {
        BetStatus::Lost
    } else if is_guaranteed_win(bet) {
        BetStatus::Won
    } else {
        BetStatus::Active
    }
}

#[cfg(test)]
pub(crate) fn test_bet(id: &str, legs: Vec<crate::models::EnrichedLeg>) -> EnrichedBet {
    EnrichedBet {
        id: id.to_string(),
        legs,
        bet_amount: None,
        payout_amount: None,
    }
}
