//! Per-course candidate domains and the pruning trail.
//!
//! Each course's domain is the set of (slot, room) index pairs still
//! consistent with its duration and room-type constraints at the
//! current search depth. Pruning deactivates candidates in place and
//! records every removal on an explicit trail, so backtracking restores
//! domains frame-by-frame instead of relying on call-stack unwinding.

use crate::catalog::Catalog;
use crate::constraints;

/// A candidate placement: indices into the catalog's slot and room lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub slot: usize,
    pub room: usize,
}

/// Why a candidate placement was eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// No slot in the catalog is long enough for the course.
    NoFittingSlot,
    /// No room in the catalog has the required type.
    NoMatchingRoom,
    /// The course's teacher is already booked in this slot.
    TeacherBusy { teacher_id: String, slot_id: String },
    /// The room is already taken in this slot.
    RoomOccupied { room_id: String, slot_id: String },
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictReason::NoFittingSlot => write!(f, "no slot is long enough"),
            ConflictReason::NoMatchingRoom => write!(f, "no room has the required type"),
            ConflictReason::TeacherBusy {
                teacher_id,
                slot_id,
            } => write!(f, "teacher '{teacher_id}' is busy in slot '{slot_id}'"),
            ConflictReason::RoomOccupied { room_id, slot_id } => {
                write!(f, "room '{room_id}' is occupied in slot '{slot_id}'")
            }
        }
    }
}

/// One recorded removal: which candidate of which course, and why.
#[derive(Debug, Clone)]
struct Removal {
    course: usize,
    index: usize,
    reason: ConflictReason,
}

/// All course domains plus the undo trail.
#[derive(Debug, Clone)]
pub(crate) struct DomainStore {
    /// Fixed candidate lists, one per course, in (slot, room) catalog order.
    candidates: Vec<Vec<Candidate>>,
    /// Parallel activity masks; pruning flips entries to `false`.
    active: Vec<Vec<bool>>,
    /// Live candidate count per course.
    live: Vec<usize>,
    /// Trail frames; each frame undoes one forward-checking pass.
    trail: Vec<Vec<Removal>>,
}

impl DomainStore {
    /// Builds initial domains from the catalog: every (slot, room) pair
    /// satisfying `fits` and `matches`, in catalog order.
    pub(crate) fn new(catalog: &Catalog) -> Self {
        let mut candidates = Vec::with_capacity(catalog.course_count());
        for course in catalog.courses() {
            let mut domain = Vec::new();
            for (slot_idx, slot) in catalog.slots().iter().enumerate() {
                if !constraints::fits(slot, course) {
                    continue;
                }
                for (room_idx, room) in catalog.rooms().iter().enumerate() {
                    if constraints::matches(room, course) {
                        domain.push(Candidate {
                            slot: slot_idx,
                            room: room_idx,
                        });
                    }
                }
            }
            candidates.push(domain);
        }

        let active: Vec<Vec<bool>> = candidates.iter().map(|d| vec![true; d.len()]).collect();
        let live: Vec<usize> = candidates.iter().map(Vec::len).collect();

        Self {
            candidates,
            active,
            live,
            trail: Vec::new(),
        }
    }

    /// Number of live candidates for a course.
    #[inline]
    pub(crate) fn live_count(&self, course: usize) -> usize {
        self.live[course]
    }

    /// Snapshot of a course's live candidates, in deterministic order.
    pub(crate) fn live_candidates(&self, course: usize) -> Vec<Candidate> {
        self.candidates[course]
            .iter()
            .zip(&self.active[course])
            .filter(|(_, &alive)| alive)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Opens a new trail frame. Every removal until the matching
    /// [`pop_frame`](Self::pop_frame) is undone together.
    pub(crate) fn begin_frame(&mut self) {
        self.trail.push(Vec::new());
    }

    /// Deactivates all live candidates of `course` matching `pred`,
    /// recording them in the current frame. Returns the removal count.
    pub(crate) fn prune<F>(&mut self, course: usize, pred: F, reason: &ConflictReason) -> usize
    where
        F: Fn(Candidate) -> bool,
    {
        let frame = self
            .trail
            .last_mut()
            .expect("prune called outside a trail frame");
        let mut removed = 0;
        for (index, (&cand, alive)) in self.candidates[course]
            .iter()
            .zip(self.active[course].iter_mut())
            .enumerate()
        {
            if *alive && pred(cand) {
                *alive = false;
                frame.push(Removal {
                    course,
                    index,
                    reason: reason.clone(),
                });
                removed += 1;
            }
        }
        self.live[course] -= removed;
        removed
    }

    /// Undoes the most recent frame, restoring every candidate it removed.
    pub(crate) fn pop_frame(&mut self) {
        let frame = self.trail.pop().expect("pop_frame without begin_frame");
        for removal in frame.into_iter().rev() {
            self.active[removal.course][removal.index] = true;
            self.live[removal.course] += 1;
        }
    }

    /// Reasons recorded against a course in the current frame.
    ///
    /// Used to explain a wipeout: when forward checking empties a
    /// course's domain, these are the constraints that eliminated its
    /// final candidates.
    pub(crate) fn frame_reasons_for(&self, course: usize) -> Vec<ConflictReason> {
        let mut reasons: Vec<ConflictReason> = Vec::new();
        if let Some(frame) = self.trail.last() {
            for removal in frame.iter().filter(|r| r.course == course) {
                if !reasons.contains(&removal.reason) {
                    reasons.push(removal.reason.clone());
                }
            }
        }
        reasons
    }

    /// Reasons recorded against a course anywhere on the trail.
    pub(crate) fn trail_reasons_for(&self, course: usize) -> Vec<ConflictReason> {
        let mut reasons: Vec<ConflictReason> = Vec::new();
        for frame in &self.trail {
            for removal in frame.iter().filter(|r| r.course == course) {
                if !reasons.contains(&removal.reason) {
                    reasons.push(removal.reason.clone());
                }
            }
        }
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Day, Room, RoomType, TimeSlot};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Course::new("c1")
                    .with_teacher("t1", "A")
                    .with_duration(2)
                    .with_room_type(RoomType::ComputerLab),
                Course::new("c2")
                    .with_teacher("t2", "B")
                    .with_duration(1)
                    .with_room_type(RoomType::Classroom),
            ],
            vec![
                TimeSlot::new("s1", Day::Monday, 800, 900),
                TimeSlot::new("s2", Day::Monday, 1000, 1200),
            ],
            vec![
                Room::new("r1", RoomType::ComputerLab, 30),
                Room::new("r2", RoomType::Classroom, 40),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_domains() {
        let cat = catalog();
        let store = DomainStore::new(&cat);

        // c1: 2h computer lab → only (s2, r1).
        assert_eq!(store.live_count(0), 1);
        assert_eq!(store.live_candidates(0), vec![Candidate { slot: 1, room: 0 }]);

        // c2: 1h classroom → both slots fit, only r2 matches.
        assert_eq!(store.live_count(1), 2);
    }

    #[test]
    fn test_prune_and_undo() {
        let cat = catalog();
        let mut store = DomainStore::new(&cat);
        let reason = ConflictReason::RoomOccupied {
            room_id: "r2".into(),
            slot_id: "s1".into(),
        };

        store.begin_frame();
        let removed = store.prune(1, |c| c.slot == 0, &reason);
        assert_eq!(removed, 1);
        assert_eq!(store.live_count(1), 1);
        assert_eq!(store.frame_reasons_for(1), vec![reason.clone()]);

        store.pop_frame();
        assert_eq!(store.live_count(1), 2);
    }

    #[test]
    fn test_nested_frames_restore_in_order() {
        let cat = catalog();
        let mut store = DomainStore::new(&cat);
        let r1 = ConflictReason::TeacherBusy {
            teacher_id: "t2".into(),
            slot_id: "s1".into(),
        };
        let r2 = ConflictReason::RoomOccupied {
            room_id: "r2".into(),
            slot_id: "s2".into(),
        };

        store.begin_frame();
        store.prune(1, |c| c.slot == 0, &r1);
        store.begin_frame();
        store.prune(1, |c| c.slot == 1, &r2);
        assert_eq!(store.live_count(1), 0);

        // Reasons across frames, deduplicated, in trail order.
        assert_eq!(store.trail_reasons_for(1), vec![r1.clone(), r2.clone()]);

        store.pop_frame();
        assert_eq!(store.live_count(1), 1);
        store.pop_frame();
        assert_eq!(store.live_count(1), 2);
    }

    #[test]
    fn test_live_candidates_keep_catalog_order() {
        let cat = catalog();
        let store = DomainStore::new(&cat);
        let c2 = store.live_candidates(1);
        // Slot-major order: (s1, r2) before (s2, r2).
        assert_eq!(c2[0].slot, 0);
        assert_eq!(c2[1].slot, 1);
    }
}
