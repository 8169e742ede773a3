//! Immutable domain catalog.
//!
//! A [`Catalog`] is the read-only snapshot of courses, time slots, and
//! rooms for one scheduling run. Construction validates structural
//! integrity and collects *all* detected problems rather than failing
//! on the first, so callers can fix malformed input in one pass:
//! - duplicate IDs per entity kind
//! - zero-duration courses, zero-capacity rooms, empty/inverted slots
//! - courses no slot is long enough for
//! - courses whose required room type matches no room
//!
//! The last two are structurally unsatisfiable before any search
//! starts; catching them here avoids discovering them by exhaustion.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{Course, Room, RoomType, TimeSlot};

/// A structural problem detected while building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two courses share the same ID.
    #[error("duplicate course ID: {id}")]
    DuplicateCourse { id: String },

    /// Two time slots share the same ID.
    #[error("duplicate slot ID: {id}")]
    DuplicateSlot { id: String },

    /// Two rooms share the same ID.
    #[error("duplicate room ID: {id}")]
    DuplicateRoom { id: String },

    /// A course has a zero duration.
    #[error("course '{course_id}' has zero duration")]
    ZeroDuration { course_id: String },

    /// A room has a zero capacity.
    #[error("room '{room_id}' has zero capacity")]
    ZeroCapacity { room_id: String },

    /// A slot ends at or before it starts.
    #[error("slot '{slot_id}' ends at or before it starts ({start_time}..{end_time})")]
    EmptySlot {
        slot_id: String,
        start_time: u32,
        end_time: u32,
    },

    /// No slot is long enough for a course.
    #[error("course '{course_id}' needs {duration_units}h but no slot is that long")]
    CourseTooLong {
        course_id: String,
        duration_units: u32,
    },

    /// No room has the type a course requires.
    #[error("course '{course_id}' requires a {room_type} but no such room exists")]
    NoMatchingRoom {
        course_id: String,
        room_type: RoomType,
    },
}

/// Immutable snapshot of the scheduling domain for one run.
///
/// Iteration order over each entity kind is insertion order; the
/// search engine relies on this as its deterministic tie-break order.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    slots: Vec<TimeSlot>,
    rooms: Vec<Room>,
    course_index: HashMap<String, usize>,
    slot_index: HashMap<String, usize>,
    room_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, validating structural integrity.
    ///
    /// Returns every detected [`CatalogError`] on failure.
    pub fn new(
        courses: Vec<Course>,
        slots: Vec<TimeSlot>,
        rooms: Vec<Room>,
    ) -> Result<Self, Vec<CatalogError>> {
        let mut errors = Vec::new();

        let mut course_index = HashMap::new();
        for (i, c) in courses.iter().enumerate() {
            if course_index.insert(c.id.clone(), i).is_some() {
                errors.push(CatalogError::DuplicateCourse { id: c.id.clone() });
            }
            if c.duration_units == 0 {
                errors.push(CatalogError::ZeroDuration {
                    course_id: c.id.clone(),
                });
            }
        }

        let mut slot_index = HashMap::new();
        for (i, s) in slots.iter().enumerate() {
            if slot_index.insert(s.id.clone(), i).is_some() {
                errors.push(CatalogError::DuplicateSlot { id: s.id.clone() });
            }
            if s.end_time <= s.start_time {
                errors.push(CatalogError::EmptySlot {
                    slot_id: s.id.clone(),
                    start_time: s.start_time,
                    end_time: s.end_time,
                });
            }
        }

        let mut room_index = HashMap::new();
        for (i, r) in rooms.iter().enumerate() {
            if room_index.insert(r.id.clone(), i).is_some() {
                errors.push(CatalogError::DuplicateRoom { id: r.id.clone() });
            }
            if r.capacity == 0 {
                errors.push(CatalogError::ZeroCapacity {
                    room_id: r.id.clone(),
                });
            }
        }

        // Per-course satisfiability: some slot long enough, some room of
        // the required type. Failing either makes search pointless.
        let max_slot_units = slots.iter().map(TimeSlot::duration_units).max().unwrap_or(0);
        for c in &courses {
            if c.duration_units > 0 && c.duration_units > max_slot_units {
                errors.push(CatalogError::CourseTooLong {
                    course_id: c.id.clone(),
                    duration_units: c.duration_units,
                });
            }
            if !rooms.iter().any(|r| r.room_type == c.required_room_type) {
                errors.push(CatalogError::NoMatchingRoom {
                    course_id: c.id.clone(),
                    room_type: c.required_room_type.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            courses,
            slots,
            rooms,
            course_index,
            slot_index,
            room_index,
        })
    }

    /// Looks up a course by ID.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    /// Looks up a time slot by ID.
    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slot_index.get(id).map(|&i| &self.slots[i])
    }

    /// Looks up a room by ID.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    /// All courses, in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All time slots, in insertion order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// All rooms, in insertion order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All rooms of a given type, in insertion order.
    pub fn rooms_of_type<'a>(&'a self, room_type: &'a RoomType) -> impl Iterator<Item = &'a Room> {
        self.rooms.iter().filter(move |r| r.room_type == *room_type)
    }

    /// All slots long enough for the given duration, in insertion order.
    pub fn slots_fitting(&self, duration_units: u32) -> impl Iterator<Item = &TimeSlot> {
        self.slots
            .iter()
            .filter(move |s| s.duration_units() >= duration_units)
    }

    /// Number of courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}
