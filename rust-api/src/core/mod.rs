//! Bet progress scoring and ranking
//!
//! Pure functions over enriched bets: no I/O, no shared state.

pub mod leg;
pub mod outcome;
pub mod sort;
pub mod stat_blocks;
pub mod sweat;

// Re-export commonly used types
pub use leg::{leg_state, progress_pct, remaining_distance, LegState};
pub use outcome::{classify, is_guaranteed_loss, is_guaranteed_win, BetStatus};
pub use sort::{sort_by_bet_amount, sort_by_payout_amount, SortMode};
pub use stat_blocks::{block_size_of, format_stat_label, stats_for_league, DEFAULT_BLOCK_SIZE};
pub use sweat::{
    rank_bets, sweat_alert, sweat_info, SortType, SweatAlert, SweatInfo, OVER_POTENTIAL_THRESHOLD,
    SWEAT_ALERT_THRESHOLD,
};

use crate::models::{BetView, EnrichedBet};

/// Attach status, sweat and alert to each bet, keeping order
pub fn to_views(bets: Vec<EnrichedBet>) -> Vec<BetView> {
    bets.into_iter()
        .map(|bet| {
            let status = classify(&bet);
            let sweat = sweat_info(&bet);
            let alert = sweat_alert(status, &sweat);
            BetView {
                bet,
                status,
                sweat,
                alert,
            }
        })
        .collect()
}
