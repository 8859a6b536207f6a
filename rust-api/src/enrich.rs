//! Attach live values to stored bets

use crate::cache::StatSource;
use crate::models::{Bet, EnrichedBet, EnrichedLeg};

/// Leading number of a raw stat value
///
/// Made-attempted values like `"6-11"` or `"20/31"` read as the made count.
pub(crate) fn parse_stat_value(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Enrich one bet; unknown players, stats or unparseable values give 0
pub fn enrich_bet<S: StatSource + ?Sized>(bet: &Bet, source: &S) -> EnrichedBet {
    let legs = bet
        .legs
        .iter()
        .map(|leg| {
            let snapshot = source.lookup(&leg.player);
            let current = snapshot
                .as_ref()
                .and_then(|s| s.stats.get(&leg.stat))
                .and_then(|raw| parse_stat_value(raw))
                .unwrap_or(0.0);

            EnrichedLeg {
                leg: leg.clone(),
                current,
                player_active: snapshot.is_some(),
                headshot: snapshot.as_ref().and_then(|s| s.headshot.clone()),
                team_logo: snapshot.and_then(|s| s.team_logo),
            }
        })
        .collect();

    EnrichedBet {
        id: bet.id.clone(),
        legs,
        bet_amount: bet.bet_amount,
        payout_amount: bet.payout_amount,
    }
}

pub fn enrich_bets<S: StatSource + ?Sized>(bets: &[Bet], source: &S) -> Vec<EnrichedBet> {
    bets.iter().map(|bet| enrich_bet(bet, source)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{test_player, PlayerCache};
    use crate::core::{classify, BetStatus};
    use crate::models::{BetLeg, Direction, League};

    fn leg(player: &str, stat: &str, goal: f64) -> BetLeg {
        BetLeg {
            player: player.to_string(),
            stat: stat.to_string(),
            goal,
            over_or_under: Direction::Over,
            league: League::Nfl,
        }
    }

    #[test]
    fn test_enrich_reads_current_values() {
        let cache = PlayerCache::from_players(vec![test_player(
            "Ja'Marr Chase",
            League::Nfl,
            &[("receiving_REC", "7"), ("receiving_YDS", "88")],
        )]);
        let bet = Bet {
            id: "bet-3".to_string(),
            legs: vec![
                leg("ja'marr chase", "receiving_REC", 11.0),
                leg("Ja'Marr Chase", "receiving_YDS", 90.0),
            ],
            bet_amount: Some(5.0),
            payout_amount: None,
        };

        let enriched = enrich_bet(&bet, &cache);
        assert_eq!(enriched.id, "bet-3");
        assert_eq!(enriched.bet_amount, Some(5.0));
        assert_eq!(enriched.legs[0].current, 7.0);
        assert_eq!(enriched.legs[1].current, 88.0);
        assert!(enriched.legs.iter().all(|l| l.player_active));
        assert_eq!(enriched.legs[1].leg, bet.legs[1]);
    }

    #[test]
    fn test_missing_player_is_inactive_zero() {
        let cache = PlayerCache::new();
        let bet = Bet {
            id: "b".to_string(),
            legs: vec![leg("Nobody", "passing_YDS", 250.0)],
            bet_amount: None,
            payout_amount: None,
        };

        let enriched = enrich_bet(&bet, &cache);
        assert_eq!(enriched.legs[0].current, 0.0);
        assert!(!enriched.legs[0].player_active);
    }

    #[test]
    fn test_missing_or_bad_stat_is_zero_but_active() {
        let cache = PlayerCache::from_players(vec![test_player(
            "Jordan Love",
            League::Nfl,
            &[("passing_YDS", "--"), ("rushing_YDS", "")],
        )]);
        let bet = Bet {
            id: "b".to_string(),
            legs: vec![
                leg("Jordan Love", "rushing_YDS", 15.0),
                leg("Jordan Love", "passing_TD", 2.0),
                leg("Jordan Love", "passing_YDS", 250.0),
            ],
            bet_amount: None,
            payout_amount: None,
        };

        let enriched = enrich_bet(&bet, &cache);
        assert!(enriched.legs.iter().all(|l| l.current == 0.0));
        assert!(enriched.legs.iter().all(|l| l.player_active));
    }

    #[test]
    fn test_made_attempted_reads_made_count() {
        let cache = PlayerCache::from_players(vec![
            test_player("Jordan Love", League::Nfl, &[("passing_C/ATT", "20/31")]),
            test_player("Jalen Brunson", League::Nba, &[("3PT", "6-11"), ("FT", "0-0")]),
        ]);
        let bet = Bet {
            id: "b".to_string(),
            legs: vec![leg("Jordan Love", "passing_C/ATT", 25.0)],
            bet_amount: None,
            payout_amount: None,
        };
        assert_eq!(enrich_bet(&bet, &cache).legs[0].current, 20.0);

        let mut three = leg("Jalen Brunson", "3PT", 4.5);
        three.over_or_under = Direction::Under;
        three.league = League::Nba;
        let mut free_throws = leg("Jalen Brunson", "FT", 3.5);
        free_throws.league = League::Nba;
        let bet = Bet {
            id: "b".to_string(),
            legs: vec![three, free_throws],
            bet_amount: None,
            payout_amount: None,
        };

        let enriched = enrich_bet(&bet, &cache);
        assert_eq!(enriched.legs[0].current, 6.0);
        assert_eq!(enriched.legs[1].current, 0.0);
        assert_eq!(classify(&enriched), BetStatus::Lost);
    }

    #[test]
    fn test_parse_stat_value() {
        assert_eq!(parse_stat_value("27"), Some(27.0));
        assert_eq!(parse_stat_value(" 6-11"), Some(6.0));
        assert_eq!(parse_stat_value("20/31"), Some(20.0));
        assert_eq!(parse_stat_value("-3"), Some(-3.0));
        assert_eq!(parse_stat_value("+4"), Some(4.0));
        assert_eq!(parse_stat_value("7.5"), Some(7.5));
        assert_eq!(parse_stat_value(".5"), Some(0.5));
        assert_eq!(parse_stat_value("12."), Some(12.0));
        assert_eq!(parse_stat_value("--"), None);
        assert_eq!(parse_stat_value("-"), None);
        assert_eq!(parse_stat_value("."), None);
        assert_eq!(parse_stat_value(""), None);
        assert_eq!(parse_stat_value("abc"), None);
    }
}
