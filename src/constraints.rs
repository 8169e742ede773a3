//! Constraint predicates.
//!
//! Pure, side-effect-free checks deciding whether a single
//! (course, slot, room) triple is valid on its own and against a
//! partial assignment. The search engine composes all three at every
//! decision point — domain construction uses `fits` and `matches`,
//! and every commit goes through `compatible` — while the verifier
//! reuses `fits` and `matches` for its post-hoc scan.

use crate::catalog::Catalog;
use crate::models::{Assignment, Course, Room, TimeSlot};

/// Whether the slot is long enough for the course.
#[inline]
pub fn fits(slot: &TimeSlot, course: &Course) -> bool {
    course.duration_units <= slot.duration_units()
}

/// Whether the room has the type the course requires.
#[inline]
pub fn matches(room: &Room, course: &Course) -> bool {
    room.room_type == course.required_room_type
}

/// Whether placing `course` into `(slot, room)` clashes with a partial
/// assignment: same teacher in the same slot, or same room in the same
/// slot. Assignments whose course ID cannot be resolved in the catalog
/// are skipped (they are the verifier's concern, not a clash).
pub fn compatible(
    partial: &[Assignment],
    catalog: &Catalog,
    course: &Course,
    slot: &TimeSlot,
    room: &Room,
) -> bool {
    for placed in partial {
        if placed.slot_id != slot.id {
            continue;
        }
        if placed.room_id == room.id {
            return false;
        }
        if let Some(other) = catalog.course(&placed.course_id) {
            if other.teacher_id == course.teacher_id {
                return false;
            }
        }
    }
    true
}
