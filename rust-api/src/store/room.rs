//! A room and the bets it owns

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::models::{Bet, BetRequest};

const MAX_ROOM_ID_LEN: usize = 64;

/// Room ids double as file names
pub fn is_valid_room_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ROOM_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Bet collection owned by one room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub bets: Vec<Bet>,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bets: Vec::new(),
        }
    }

    fn position(&self, bet_id: &str) -> Result<usize, StoreError> {
        self.bets
            .iter()
            .position(|b| b.id == bet_id)
            .ok_or_else(|| StoreError::BetNotFound(bet_id.to_string()))
    }

    /// `bet-{millis}`, bumped until unused in this room
    fn next_id(&self, now_ms: i64) -> String {
        let mut stamp = now_ms;
        loop {
            let id = format!("bet-{}", stamp);
            if self.bets.iter().all(|b| b.id != id) {
                return id;
            }
            stamp += 1;
        }
    }

    pub fn create(&mut self, req: BetRequest, now_ms: i64) -> Bet {
        let bet = Bet {
            id: self.next_id(now_ms),
            legs: req.legs,
            bet_amount: req.bet_amount,
            payout_amount: req.payout_amount,
        };
        self.bets.push(bet.clone());
        bet
    }

    pub fn update(&mut self, bet_id: &str, req: BetRequest) -> Result<Bet, StoreError> {
        let index = self.position(bet_id)?;
        let bet = Bet {
            id: bet_id.to_string(),
            legs: req.legs,
            bet_amount: req.bet_amount,
            payout_amount: req.payout_amount,
        };
        self.bets[index] = bet.clone();
        Ok(bet)
    }

    pub fn delete(&mut self, bet_id: &str) -> Result<Bet, StoreError> {
        let index = self.position(bet_id)?;
        Ok(self.bets.remove(index))
    }

    /// Remove one leg; a bet always keeps at least one
    pub fn delete_leg(&mut self, bet_id: &str, leg_index: usize) -> Result<Bet, StoreError> {
        let index = self.position(bet_id)?;
        let bet = &mut self.bets[index];

        if leg_index >= bet.legs.len() {
            return Err(StoreError::InvalidLegIndex {
                index: leg_index,
                len: bet.legs.len(),
            });
        }
        if bet.legs.len() == 1 {
            return Err(StoreError::LastLeg);
        }

        bet.legs.remove(leg_index);
        Ok(bet.clone())
    }
}

#[cfg(test)]
pub(crate) fn test_request(players: &[&str]) -> BetRequest {
    use crate::models::{BetLeg, Direction, League};

    BetRequest {
        legs: players
            .iter()
            .map(|p| BetLeg {
                player: p.to_string(),
                stat: "PTS".to_string(),
                goal: 20.0,
                over_or_under: Direction::Over,
                league: League::Nba,
            })
            .collect(),
        bet_amount: Some(10.0),
        payout_amount: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_validation() {
        assert!(is_valid_room_id("friday-night_01"));
        assert!(!is_valid_room_id(""));
        assert!(!is_valid_room_id("../etc"));
        assert!(!is_valid_room_id("has space"));
        assert!(!is_valid_room_id(&"a".repeat(65)));
        assert!(is_valid_room_id(&"a".repeat(64)));
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut room = Room::new("r");
        let a = room.create(test_request(&["A"]), 1_000);
        let b = room.create(test_request(&["B"]), 1_000);
        assert_eq!(a.id, "bet-1000");
        assert_eq!(b.id, "bet-1001");
        assert_eq!(room.bets.len(), 2);
    }

    #[test]
    fn test_update_keeps_id_and_replaces_fields() {
        let mut room = Room::new("r");
        let bet = room.create(test_request(&["A"]), 5);

        let mut req = test_request(&["B", "C"]);
        req.bet_amount = None;
        let updated = room.update(&bet.id, req).unwrap();

        assert_eq!(updated.id, bet.id);
        assert_eq!(updated.legs.len(), 2);
        assert_eq!(updated.bet_amount, None);
        assert_eq!(room.bets[0], updated);
    }

    #[test]
    fn test_unknown_bet_is_not_found() {
        let mut room = Room::new("r");
        assert!(matches!(
            room.update("missing", test_request(&["A"])),
            Err(StoreError::BetNotFound(_))
        ));
        assert!(matches!(room.delete("missing"), Err(StoreError::BetNotFound(_))));
    }

    #[test]
    fn test_delete_leg_rules() {
        let mut room = Room::new("r");
        let bet = room.create(test_request(&["A", "B"]), 1);

        assert!(matches!(
            room.delete_leg(&bet.id, 2),
            Err(StoreError::InvalidLegIndex { index: 2, len: 2 })
        ));

        let trimmed = room.delete_leg(&bet.id, 0).unwrap();
        assert_eq!(trimmed.legs.len(), 1);
        assert_eq!(trimmed.legs[0].player, "B");

        assert!(matches!(room.delete_leg(&bet.id, 0), Err(StoreError::LastLeg)));
        assert_eq!(room.bets[0].legs.len(), 1);
    }

    #[test]
    fn test_delete_removes_bet() {
        let mut room = Room::new("r");
        let a = room.create(test_request(&["A"]), 1);
        let b = room.create(test_request(&["B"]), 2);

        let removed = room.delete(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(room.bets, vec![b]);
    }
}
