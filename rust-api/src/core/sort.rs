//! Display orderings

use std::cmp::Ordering;
use std::str::FromStr;

use super::sweat::rank_bets;
use crate::models::EnrichedBet;

/// How the dashboard orders a room's bets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Sweat ranking
    #[default]
    Completion,
    /// Bet amount, high to low
    Bet,
    /// Payout amount, high to low
    Payout,
    /// Stored order
    None,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completion" => Ok(SortMode::Completion),
            "bet" => Ok(SortMode::Bet),
            "payout" => Ok(SortMode::Payout),
            "none" => Ok(SortMode::None),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

impl SortMode {
    pub fn apply(self, bets: Vec<EnrichedBet>) -> Vec<EnrichedBet> {
        match self {
            SortMode::Completion => rank_bets(bets),
            SortMode::Bet => sort_by_bet_amount(bets),
            SortMode::Payout => sort_by_payout_amount(bets),
            SortMode::None => bets,
        }
    }
}

/// Descending by key; bets without a key keep input order at the end
fn sort_by_amount(
    bets: Vec<EnrichedBet>,
    key: impl Fn(&EnrichedBet) -> Option<f64>,
) -> Vec<EnrichedBet> {
    let (mut with_amount, without_amount): (Vec<_>, Vec<_>) =
        bets.into_iter().partition(|bet| key(bet).is_some());

    with_amount.sort_by(|a, b| {
        let a = key(a).unwrap_or(0.0);
        let b = key(b).unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });

    with_amount.into_iter().chain(without_amount).collect()
}

pub fn sort_by_bet_amount(bets: Vec<EnrichedBet>) -> Vec<EnrichedBet> {
    sort_by_amount(bets, |bet| bet.bet_amount)
}

pub fn sort_by_payout_amount(bets: Vec<EnrichedBet>) -> Vec<EnrichedBet> {
    sort_by_amount(bets, |bet| bet.payout_amount)
}
