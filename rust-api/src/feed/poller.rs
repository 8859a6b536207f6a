//! Background refresh of the player cache

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::client::EspnClient;
use crate::cache::PlayerCache;
use crate::models::League;

/// Periodically polls one or more leagues into a shared cache
pub struct Poller {
    client: EspnClient,
    cache: Arc<PlayerCache>,
    interval: Duration,
    date: Option<String>,
}

impl Poller {
    pub fn new(
        client: EspnClient,
        cache: Arc<PlayerCache>,
        interval: Duration,
        date: Option<String>,
    ) -> Self {
        Self {
            client,
            cache,
            interval,
            date,
        }
    }

    /// Poll a league once and merge the result into the cache
    pub async fn poll_once(&self, league: League) -> usize {
        match self.client.poll_league(league, self.date.as_deref()).await {
            Ok(players) => {
                let count = players.len();
                self.cache.upsert_many(players);
                info!(
                    "Updated {} players for {} (cache size: {})",
                    count,
                    league,
                    self.cache.len()
                );
                count
            }
            Err(e) => {
                warn!("Poll error for {}: {}", league, e);
                0
            }
        }
    }

    /// Poll immediately, then on every interval tick
    ///
    /// With a fixed date the league is polled once: the games are historical.
    pub async fn run(self: Arc<Self>, league: League) {
        self.poll_once(league).await;

        if self.date.is_some() {
            info!("Fixed poll date set; not repeating {} polls", league);
            return;
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.poll_once(league).await;
        }
    }
}
