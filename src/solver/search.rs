//! Backtracking search with forward checking.
//!
//! Models timetabling as a CSP: variables are courses, values are
//! (slot, room) pairs. Search assigns the most constrained course
//! first, prunes affected domains eagerly after every tentative
//! assignment, and undoes pruning through the explicit trail on
//! backtrack. Candidate order and tie-breaking follow catalog
//! insertion order, so identical catalogs always produce identical
//! schedules or identical failures.
//!
//! # Reference
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6: Constraint Satisfaction Problems
//! - Dechter (2003), "Constraint Processing", Ch. 5-6

use log::{debug, trace};
use thiserror::Error;

use super::domain::{Candidate, ConflictReason, DomainStore};
use crate::catalog::Catalog;
use crate::constraints;
use crate::models::Assignment;
use crate::verify::Violation;

/// Why a generation attempt produced no timetable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingFailure {
    /// The search space is exhausted; the named course is the proximate
    /// cause (the last course that could not be placed), with the
    /// constraints that eliminated its final candidates.
    #[error("course '{course_id}' cannot be placed: {}", describe_reasons(.reasons))]
    Unplaceable {
        course_id: String,
        reasons: Vec<ConflictReason>,
    },

    /// The backtrack ceiling was hit before the search space was
    /// exhausted. Not a proof of infeasibility; retry with a larger
    /// budget.
    #[error("search budget exhausted after {backtracks} backtracks")]
    BudgetExhausted { backtracks: u64 },

    /// The defensive re-verification of a found solution failed.
    #[error("solver produced an invalid schedule with {} violation(s)", .violations.len())]
    InvalidSolution { violations: Vec<Violation> },
}

fn describe_reasons(reasons: &[ConflictReason]) -> String {
    if reasons.is_empty() {
        return "all candidate placements exhausted".to_string();
    }
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Backtrack ceiling. `None` = unbounded (search space is finite,
    /// so unbounded search still terminates).
    pub max_backtracks: Option<u64>,
}

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Tentative assignments tried.
    pub nodes: u64,
    /// Tentative assignments undone.
    pub backtracks: u64,
    /// Candidates removed by forward checking (including restored ones).
    pub prunes: u64,
}

/// Outcome of one search invocation: raw id-index assignments.
pub(crate) struct SearchResult {
    pub outcome: Result<Vec<(usize, Candidate)>, SchedulingFailure>,
    pub stats: SolverStats,
}

/// Runs the search over the given catalog.
pub(crate) fn run(catalog: &Catalog, config: &SolverConfig) -> SearchResult {
    let mut searcher = Searcher::new(catalog, config);
    let outcome = searcher.solve();
    SearchResult {
        outcome,
        stats: searcher.stats,
    }
}

/// The infeasibility witness: the course that could not be placed and
/// the constraints that eliminated its final candidates.
struct Witness {
    course: usize,
    reasons: Vec<ConflictReason>,
}

enum Step {
    Solved,
    /// All branches failed; carries the proximate cause, so an
    /// exhausted search can never surface without a named course.
    Exhausted(Witness),
    Budget,
}

struct Searcher<'a> {
    catalog: &'a Catalog,
    domains: DomainStore,
    assigned: Vec<Option<Candidate>>,
    unassigned: usize,
    max_backtracks: Option<u64>,
    stats: SolverStats,
}

impl<'a> Searcher<'a> {
    fn new(catalog: &'a Catalog, config: &SolverConfig) -> Self {
        let count = catalog.course_count();
        Self {
            catalog,
            domains: DomainStore::new(catalog),
            assigned: vec![None; count],
            unassigned: count,
            max_backtracks: config.max_backtracks,
            stats: SolverStats::default(),
        }
    }

    fn solve(&mut self) -> Result<Vec<(usize, Candidate)>, SchedulingFailure> {
        // A course with an empty initial domain needs no search at all.
        for (i, course) in self.catalog.courses().iter().enumerate() {
            if self.domains.live_count(i) == 0 {
                let reasons = self.initial_emptiness_reasons(i);
                debug!(
                    "course '{}' has an empty initial domain: {}",
                    course.id,
                    describe_reasons(&reasons)
                );
                return Err(SchedulingFailure::Unplaceable {
                    course_id: course.id.clone(),
                    reasons,
                });
            }
        }

        debug!(
            "solving: {} courses, {} slots, {} rooms",
            self.catalog.course_count(),
            self.catalog.slots().len(),
            self.catalog.rooms().len()
        );

        match self.search() {
            Step::Solved => {
                debug!(
                    "solved: {} nodes, {} backtracks, {} prunes",
                    self.stats.nodes, self.stats.backtracks, self.stats.prunes
                );
                let placements = self
                    .assigned
                    .iter()
                    .enumerate()
                    .filter_map(|(i, cand)| cand.map(|c| (i, c)))
                    .collect();
                Ok(placements)
            }
            Step::Budget => {
                debug!("budget exhausted after {} backtracks", self.stats.backtracks);
                Err(SchedulingFailure::BudgetExhausted {
                    backtracks: self.stats.backtracks,
                })
            }
            Step::Exhausted(witness) => {
                let course_id = self.catalog.courses()[witness.course].id.clone();
                debug!(
                    "infeasible: course '{}' cannot be placed ({})",
                    course_id,
                    describe_reasons(&witness.reasons)
                );
                Err(SchedulingFailure::Unplaceable {
                    course_id,
                    reasons: witness.reasons,
                })
            }
        }
    }

    /// Distinguishes "no slot long enough" from "no matching room" for
    /// a course whose initial domain is empty. Normally the catalog
    /// rejects both cases up front; the solver does not rely on that.
    fn initial_emptiness_reasons(&self, course: usize) -> Vec<ConflictReason> {
        let c = &self.catalog.courses()[course];
        let mut reasons = Vec::new();
        if self.catalog.slots_fitting(c.duration_units).count() == 0 {
            reasons.push(ConflictReason::NoFittingSlot);
        }
        if self.catalog.rooms_of_type(&c.required_room_type).count() == 0 {
            reasons.push(ConflictReason::NoMatchingRoom);
        }
        reasons
    }

    fn search(&mut self) -> Step {
        if self.unassigned == 0 {
            return Step::Solved;
        }

        let course = self.select_course();
        let candidates = self.domains.live_candidates(course);
        let mut witness: Option<Witness> = None;

        for cand in candidates {
            // The evaluator has the final say on every decision point;
            // pruning keeps domains clash-free, but commits go through
            // the same predicate the rest of the crate uses.
            if !self.candidate_compatible(course, cand) {
                continue;
            }

            self.stats.nodes += 1;
            trace!(
                "try '{}' -> ('{}', '{}')",
                self.catalog.courses()[course].id,
                self.catalog.slots()[cand.slot].id,
                self.catalog.rooms()[cand.room].id
            );
            self.assigned[course] = Some(cand);
            self.unassigned -= 1;
            self.domains.begin_frame();

            match self.forward_check(course, cand) {
                Some(wiped) => {
                    // This candidate empties another course's domain;
                    // record the wipeout as the current witness.
                    witness = Some(Witness {
                        course: wiped,
                        reasons: self.domains.frame_reasons_for(wiped),
                    });
                    trace!(
                        "reject: wipes out '{}'",
                        self.catalog.courses()[wiped].id
                    );
                    if let Some(step) = self.backtrack(course) {
                        return step;
                    }
                }
                None => match self.search() {
                    Step::Solved => return Step::Solved,
                    Step::Budget => return Step::Budget,
                    Step::Exhausted(deeper) => {
                        // The deeper wipeout is the more precise cause.
                        witness = Some(deeper);
                        if let Some(step) = self.backtrack(course) {
                            return step;
                        }
                    }
                },
            }
        }

        // Candidate loop exhausted: the most recent wipeout is the
        // proximate cause; without one, this course itself is, with
        // whatever pruning the trail records against it.
        Step::Exhausted(witness.unwrap_or_else(|| Witness {
            course,
            reasons: self.domains.trail_reasons_for(course),
        }))
    }

    /// Replays the current partial assignment through the constraint
    /// evaluator for one candidate placement.
    fn candidate_compatible(&self, course: usize, cand: Candidate) -> bool {
        let partial = self.partial_assignments();
        constraints::compatible(
            &partial,
            self.catalog,
            &self.catalog.courses()[course],
            &self.catalog.slots()[cand.slot],
            &self.catalog.rooms()[cand.room],
        )
    }

    /// The current partial assignment as raw id triples.
    fn partial_assignments(&self) -> Vec<Assignment> {
        self.assigned
            .iter()
            .enumerate()
            .filter_map(|(i, cand)| {
                cand.map(|c| {
                    Assignment::new(
                        &self.catalog.courses()[i].id,
                        &self.catalog.slots()[c.slot].id,
                        &self.catalog.rooms()[c.room].id,
                    )
                })
            })
            .collect()
    }

    /// Undoes the tentative assignment of `course` and counts one
    /// backtrack. Returns `Some(Step::Budget)` when the ceiling is hit.
    fn backtrack(&mut self, course: usize) -> Option<Step> {
        self.domains.pop_frame();
        self.assigned[course] = None;
        self.unassigned += 1;
        self.stats.backtracks += 1;
        if let Some(max) = self.max_backtracks {
            if self.stats.backtracks > max {
                return Some(Step::Budget);
            }
        }
        None
    }

    /// Most-constrained-variable selection: the unassigned course with
    /// the smallest live domain, ties broken by catalog order.
    fn select_course(&self) -> usize {
        let mut best = usize::MAX;
        let mut best_size = usize::MAX;
        for i in 0..self.assigned.len() {
            if self.assigned[i].is_some() {
                continue;
            }
            let size = self.domains.live_count(i);
            if size < best_size {
                best = i;
                best_size = size;
            }
        }
        best
    }

    /// Prunes the domains of all other unassigned courses after
    /// tentatively placing `course` at `cand`:
    /// - same-teacher courses lose every pair using that slot;
    /// - every course loses pairs using that room in that slot.
    ///
    /// Returns the first course whose domain wiped out, if any.
    fn forward_check(&mut self, course: usize, cand: Candidate) -> Option<usize> {
        let teacher_id = self.catalog.courses()[course].teacher_id.clone();
        let slot_id = self.catalog.slots()[cand.slot].id.clone();
        let room_id = self.catalog.rooms()[cand.room].id.clone();

        let teacher_busy = ConflictReason::TeacherBusy {
            teacher_id: teacher_id.clone(),
            slot_id: slot_id.clone(),
        };
        let room_occupied = ConflictReason::RoomOccupied { room_id, slot_id };

        for other in 0..self.assigned.len() {
            if other == course || self.assigned[other].is_some() {
                continue;
            }

            let mut removed = 0;
            if self.catalog.courses()[other].teacher_id == teacher_id {
                removed += self
                    .domains
                    .prune(other, |c| c.slot == cand.slot, &teacher_busy);
            } else {
                removed += self.domains.prune(
                    other,
                    |c| c.slot == cand.slot && c.room == cand.room,
                    &room_occupied,
                );
            }
            self.stats.prunes += removed as u64;

            if removed > 0 && self.domains.live_count(other) == 0 {
                return Some(other);
            }
        }
        None
    }
}
