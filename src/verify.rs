//! Post-hoc conflict checking.
//!
//! [`check_conflicts`] is an independent, read-only scan over any
//! schedule — including hand-built or externally supplied ones — that
//! reports every invariant breach it finds. It reuses the engine's
//! `fits` and `matches` predicates but trusts nothing about how the
//! schedule was produced. It never fails: an empty list is the success
//! case, and dangling ids become [`ViolationKind::UnknownReference`]
//! findings rather than errors.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constraints;
use crate::models::Schedule;

/// A constraint breach found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that was broken.
    pub kind: ViolationKind,
    /// Primary implicated entity (course, slot, or room ID).
    pub entity_id: String,
    /// Human-readable description naming all implicated entries.
    pub message: String,
}

/// Classification of constraint breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Two entries share a teacher and a slot.
    TeacherDoubleBooked,
    /// Two entries share a room and a slot.
    RoomDoubleBooked,
    /// An entry's course is longer than its slot.
    DurationExceedsSlot,
    /// An entry's room has the wrong type for its course.
    RoomTypeMismatch,
    /// A course appears in more than one entry.
    DuplicateCourse,
    /// An entry references a course, slot, or room the catalog does
    /// not contain.
    UnknownReference,
}

impl Violation {
    fn new(kind: ViolationKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// Scans a schedule for every invariant breach.
///
/// Checks, per entry: catalog membership of all three ids, duration
/// fit, and room-type match. Checks, per entry pair: course
/// uniqueness, teacher double-booking, and room double-booking.
/// Deterministic and idempotent; the result order follows entry order.
pub fn check_conflicts(schedule: &Schedule, catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for entry in &schedule.entries {
        let course = match catalog.course(&entry.course.id) {
            Some(c) => c,
            None => {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    &entry.course.id,
                    format!("course '{}' is not in the catalog", entry.course.id),
                ));
                continue;
            }
        };
        let slot = match catalog.slot(&entry.slot.id) {
            Some(s) => s,
            None => {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    &entry.slot.id,
                    format!(
                        "entry for course '{}' references unknown slot '{}'",
                        entry.course.id, entry.slot.id
                    ),
                ));
                continue;
            }
        };
        let room = match catalog.room(&entry.room.id) {
            Some(r) => r,
            None => {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    &entry.room.id,
                    format!(
                        "entry for course '{}' references unknown room '{}'",
                        entry.course.id, entry.room.id
                    ),
                ));
                continue;
            }
        };

        if !constraints::fits(slot, course) {
            violations.push(Violation::new(
                ViolationKind::DurationExceedsSlot,
                &course.id,
                format!(
                    "course '{}' needs {}h but slot '{}' is {}h",
                    course.id,
                    course.duration_units,
                    slot.id,
                    slot.duration_units()
                ),
            ));
        }
        if !constraints::matches(room, course) {
            violations.push(Violation::new(
                ViolationKind::RoomTypeMismatch,
                &course.id,
                format!(
                    "course '{}' requires a {} but room '{}' is a {}",
                    course.id, course.required_room_type, room.id, room.room_type
                ),
            ));
        }
    }

    // Pairwise checks work on the raw triples so they also cover
    // entries skipped above for other reasons.
    let entries = &schedule.entries;
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (a, b) = (&entries[i], &entries[j]);

            if a.course.id == b.course.id {
                violations.push(Violation::new(
                    ViolationKind::DuplicateCourse,
                    &a.course.id,
                    format!("course '{}' appears more than once", a.course.id),
                ));
            }

            if a.slot.id != b.slot.id {
                continue;
            }
            if a.room.id == b.room.id {
                violations.push(Violation::new(
                    ViolationKind::RoomDoubleBooked,
                    &a.room.id,
                    format!(
                        "room '{}' hosts both '{}' and '{}' in slot '{}'",
                        a.room.id, a.course.id, b.course.id, a.slot.id
                    ),
                ));
            }
            // Teacher identity comes from the catalog, not the entry,
            // so tampered or stale entry data cannot mask a clash.
            let teacher_a = catalog.course(&a.course.id).map(|c| c.teacher_id.as_str());
            let teacher_b = catalog.course(&b.course.id).map(|c| c.teacher_id.as_str());
            if let (Some(ta), Some(tb)) = (teacher_a, teacher_b) {
                if ta == tb {
                    violations.push(Violation::new(
                        ViolationKind::TeacherDoubleBooked,
                        ta,
                        format!(
                            "teacher '{ta}' gives both '{}' and '{}' in slot '{}'",
                            a.course.id, b.course.id, a.slot.id
                        ),
                    ));
                }
            }
        }
    }

    violations
}
