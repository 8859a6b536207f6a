//! Sweddy - live parlay tracker
//!
//! This library provides:
//! - Bet progress scoring: normalized leg distances, win/loss classification
//!   and the sweat ranking across bets
//! - A live player stat cache fed by the ESPN site API
//! - Enrichment of stored bets with live values
//! - Room-scoped JSON persistence for bets
//!
//! # Example
//!
//! ```
//! use sweddy::cache::PlayerCache;
//! use sweddy::core::{classify, rank_bets, BetStatus};
//! use sweddy::enrich::enrich_bets;
//! use sweddy::models::{Bet, BetLeg, Direction, League};
//!
//! let cache = PlayerCache::new();
//! let bet = Bet {
//!     id: "bet-1".to_string(),
//!     legs: vec![BetLeg {
//!         player: "Myles Turner".to_string(),
//!         stat: "BLK".to_string(),
//!         goal: 1.0,
//!         over_or_under: Direction::Over,
//!         league: League::Nba,
//!     }],
//!     bet_amount: None,
//!     payout_amount: None,
//! };
//!
//! let ranked = rank_bets(enrich_bets(&[bet], &cache));
//! assert_eq!(classify(&ranked[0]), BetStatus::Active);
//! ```

pub mod cache;
pub mod config;
pub mod core;
pub mod enrich;
pub mod error;
pub mod feed;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use cache::{PlayerCache, StatSnapshot, StatSource};
pub use config::ServerConfig;
pub use enrich::{enrich_bet, enrich_bets};
pub use models::{Bet, BetLeg, BetRequest, BetView, Direction, EnrichedBet, EnrichedLeg, League};
pub use store::{BetStore, RoomRegistry, StoreError};
