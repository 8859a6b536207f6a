//! JSON-file persistence for rooms and their bets
//!
//! Each room lives in `{data_dir}/rooms/{room}.json`. Rooms are loaded on
//! first use and written back after every mutation.

mod registry;
mod room;

pub use registry::{RoomRegistry, RoomVisit, ROOM_TTL_MS};
pub use room::{is_valid_room_id, Room};

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::info;

use crate::models::{Bet, BetRequest};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bet not found: {0}")]
    BetNotFound(String),

    #[error("Invalid leg index {index} for bet with {len} legs")]
    InvalidLegIndex { index: usize, len: usize },

    #[error("Cannot delete the last leg. Delete the entire bet instead.")]
    LastLeg,

    #[error("Invalid room id: {0:?}")]
    InvalidRoomId(String),
}

/// Write JSON through a temp file so readers never see a partial file
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Room-scoped bet storage
#[derive(Debug)]
pub struct BetStore {
    dir: PathBuf,
    rooms: Mutex<HashMap<String, Room>>,
}

impl BetStore {
    /// Open (and create if needed) the rooms directory under `data_dir`
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref().join("rooms");
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            rooms: Mutex::new(HashMap::new()),
        })
    }

    fn room_path(&self, room_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", room_id))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Room>> {
        self.rooms.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load_room(&self, room_id: &str) -> Result<Room, StoreError> {
        let path = self.room_path(room_id);
        if !path.exists() {
            return Ok(Room::new(room_id));
        }

        let content = fs::read_to_string(&path)?;
        let bets: Vec<Bet> = serde_json::from_str(&content)?;
        info!("Loaded {} bets for room {}", bets.len(), room_id);
        Ok(Room {
            id: room_id.to_string(),
            bets,
        })
    }

    /// Run `f` against a room, loading it first and persisting it after
    ///
    /// A failed write leaves the room as it was.
    fn with_room<R>(
        &self,
        room_id: &str,
        persist: bool,
        f: impl FnOnce(&mut Room) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        if !is_valid_room_id(room_id) {
            return Err(StoreError::InvalidRoomId(room_id.to_string()));
        }

        let mut rooms = self.lock();
        if !rooms.contains_key(room_id) {
            let room = self.load_room(room_id)?;
            rooms.insert(room_id.to_string(), room);
        }
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::InvalidRoomId(room_id.to_string()))?;

        if !persist {
            return f(room);
        }

        // Mutate a copy; the cached room only changes once the write lands
        let mut next = room.clone();
        let result = f(&mut next)?;
        write_json(&self.room_path(room_id), &next.bets)?;
        *room = next;
        Ok(result)
    }

    /// Bets of a room in stored order
    pub fn bets(&self, room_id: &str) -> Result<Vec<Bet>, StoreError> {
        self.with_room(room_id, false, |room| Ok(room.bets.clone()))
    }

    pub fn create_bet(&self, room_id: &str, req: BetRequest, now_ms: i64) -> Result<Bet, StoreError> {
        let bet = self.with_room(room_id, true, |room| Ok(room.create(req, now_ms)))?;
        info!("Created {} in room {}", bet.id, room_id);
        Ok(bet)
    }

    pub fn update_bet(&self, room_id: &str, bet_id: &str, req: BetRequest) -> Result<Bet, StoreError> {
        let bet = self.with_room(room_id, true, |room| room.update(bet_id, req))?;
        info!("Updated {} in room {}", bet_id, room_id);
        Ok(bet)
    }

    pub fn delete_bet(&self, room_id: &str, bet_id: &str) -> Result<(), StoreError> {
        self.with_room(room_id, true, |room| room.delete(bet_id))?;
        info!("Deleted {} from room {}", bet_id, room_id);
        Ok(())
    }

    pub fn delete_leg(&self, room_id: &str, bet_id: &str, leg_index: usize) -> Result<Bet, StoreError> {
        let bet = self.with_room(room_id, true, |room| room.delete_leg(bet_id, leg_index))?;
        info!("Deleted leg {} of {} in room {}", leg_index, bet_id, room_id);
        Ok(bet)
    }
}
