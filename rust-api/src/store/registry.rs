//! Recently visited rooms
//!
//! Entries expire after [`ROOM_TTL_MS`] without a visit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{is_valid_room_id, write_json, StoreError};

/// One day
pub const ROOM_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomVisit {
    pub id: String,
    /// Unix millis
    pub last_visited: i64,
}

/// Room visit list persisted at `{data_dir}/rooms.json`
#[derive(Debug)]
pub struct RoomRegistry {
    path: PathBuf,
    rooms: Mutex<Vec<RoomVisit>>,
}

impl RoomRegistry {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir.as_ref())?;
        let path = data_dir.as_ref().join("rooms.json");

        let rooms = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            rooms: Mutex::new(rooms),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RoomVisit>> {
        self.rooms.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sorted(rooms: &[RoomVisit]) -> Vec<RoomVisit> {
        let mut out = rooms.to_vec();
        out.sort_by(|a, b| b.last_visited.cmp(&a.last_visited));
        out
    }

    /// Live rooms, most recent first; expired entries are dropped for good
    pub fn list(&self, now_ms: i64) -> Result<Vec<RoomVisit>, StoreError> {
        let mut rooms = self.lock();
        let live: Vec<RoomVisit> = rooms
            .iter()
            .filter(|r| now_ms - r.last_visited <= ROOM_TTL_MS)
            .cloned()
            .collect();

        if live.len() != rooms.len() {
            write_json(&self.path, &live)?;
            *rooms = live;
        }
        Ok(Self::sorted(&rooms))
    }

    /// Upsert a visit at `now_ms`; memory only changes once the write lands
    pub fn record_visit(&self, room_id: &str, now_ms: i64) -> Result<Vec<RoomVisit>, StoreError> {
        if !is_valid_room_id(room_id) {
            return Err(StoreError::InvalidRoomId(room_id.to_string()));
        }

        let mut rooms = self.lock();
        let mut next: Vec<RoomVisit> = rooms
            .iter()
            .filter(|r| r.id != room_id && now_ms - r.last_visited <= ROOM_TTL_MS)
            .cloned()
            .collect();
        next.push(RoomVisit {
            id: room_id.to_string(),
            last_visited: now_ms,
        });

        let sorted = Self::sorted(&next);
        write_json(&self.path, &sorted)?;
        *rooms = sorted.clone();
        Ok(sorted)
    }

    pub fn remove(&self, room_id: &str) -> Result<Vec<RoomVisit>, StoreError> {
        let mut rooms = self.lock();
        let next: Vec<RoomVisit> = rooms.iter().filter(|r| r.id != room_id).cloned().collect();
        write_json(&self.path, &next)?;
        *rooms = next;
        Ok(Self::sorted(&rooms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: i64 = 60 * 60 * 1000;

    #[test]
    fn test_record_visit_dedupes_and_sorts() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();

        registry.record_visit("a", HOUR).unwrap();
        registry.record_visit("b", 2 * HOUR).unwrap();
        let rooms = registry.record_visit("a", 3 * HOUR).unwrap();

        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(rooms[0].last_visited, 3 * HOUR);
    }

    #[test]
    fn test_list_expires_old_rooms() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();
        registry.record_visit("old", 0).unwrap();
        registry.record_visit("new", 20 * HOUR).unwrap();

        let rooms = registry.list(25 * HOUR).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "new");

        // Pruning is persisted
        let reopened = RoomRegistry::open(dir.path()).unwrap();
        assert_eq!(reopened.list(0).unwrap().len(), 1);
    }

    #[test]
    fn test_ttl_boundary_is_inclusive() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();
        registry.record_visit("edge", 0).unwrap();
        assert_eq!(registry.list(ROOM_TTL_MS).unwrap().len(), 1);
        assert!(registry.list(ROOM_TTL_MS + 1).unwrap().is_empty());
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();
        registry.record_visit("a", 1).unwrap();
        registry.record_visit("b", 2).unwrap();

        let rooms = registry.remove("a").unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "b");
    }

    #[test]
    fn test_invalid_room_rejected() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();
        assert!(registry.record_visit("no/slashes", 1).is_err());
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let dir = TempDir::new().unwrap();
        let registry = RoomRegistry::open(dir.path()).unwrap();
        registry.record_visit("a", 1).unwrap();

        fs::create_dir(dir.path().join("rooms.json.tmp")).unwrap();
        assert!(registry.record_visit("b", 2).is_err());
        assert!(registry.remove("a").is_err());

        let rooms = registry.list(3).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "a");
    }
}
