//! Schedule (solution) model.
//!
//! A schedule is a set of course placements. The search engine produces
//! raw [`Assignment`] triples; the solution assembler hydrates them
//! into [`ScheduleEntry`] values by dereferencing the catalog, so
//! consumers never have to resolve ids themselves.

use serde::{Deserialize, Serialize};

use super::{Course, Day, Room, TimeSlot};

/// A raw course placement: id triple only.
///
/// Produced by the search engine before hydration. Also the form the
/// verifier accepts, so externally built schedules can be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Placed course ID.
    pub course_id: String,
    /// Assigned time slot ID.
    pub slot_id: String,
    /// Assigned room ID.
    pub room_id: String,
}

/// A fully-hydrated course placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// The placed course.
    pub course: Course,
    /// The slot it occupies.
    pub slot: TimeSlot,
    /// The room it occupies.
    pub room: Room,
}

/// A complete timetable (solution to a timetabling problem).
///
/// Entry order follows catalog course order; it carries no semantic
/// meaning but is deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Course placements, at most one per course.
    pub entries: Vec<ScheduleEntry>,
}

impl Assignment {
    /// Creates a new assignment triple.
    pub fn new(
        course_id: impl Into<String>,
        slot_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            slot_id: slot_id.into(),
            room_id: room_id.into(),
        }
    }
}

impl ScheduleEntry {
    /// Creates a new hydrated entry.
    pub fn new(course: Course, slot: TimeSlot, room: Room) -> Self {
        Self { course, slot, room }
    }

    /// The raw id triple for this entry.
    pub fn assignment(&self) -> Assignment {
        Assignment::new(&self.course.id, &self.slot.id, &self.room.id)
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of placed courses.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry for a given course.
    pub fn entry_for_course(&self, course_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.course.id == course_id)
    }

    /// Returns all entries on a given day.
    pub fn entries_for_day(&self, day: Day) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.slot.day == day).collect()
    }

    /// Returns all entries held in a given room.
    pub fn entries_for_room(&self, room_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.room.id == room_id)
            .collect()
    }

    /// Returns all entries taught by a given teacher.
    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.course.teacher_id == teacher_id)
            .collect()
    }

    /// The raw id triples, in entry order.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.entries.iter().map(ScheduleEntry::assignment).collect()
    }
}
