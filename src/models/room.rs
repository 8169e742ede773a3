//! Room model.

use serde::{Deserialize, Serialize};

use super::RoomType;

/// A room courses can be held in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Room classification, matched against `Course::required_room_type`.
    pub room_type: RoomType,
    /// Seating capacity.
    pub capacity: u32,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, room_type: RoomType, capacity: u32) -> Self {
        Self {
            id: id.into(),
            room_type,
            capacity,
        }
    }
}
