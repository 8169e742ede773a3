//! Timetable search engine.
//!
//! The engine treats timetabling as a constraint-satisfaction problem
//! and explores it with backtracking plus forward checking (see
//! [`search`] for the algorithm). This module is the integration port:
//! [`generate`] takes an immutable [`Catalog`] and returns either a
//! complete, conflict-free [`Schedule`] or a [`SchedulingFailure`]
//! naming the unplaceable course and the constraints that eliminated
//! its candidates.
//!
//! Every invocation is independent: all search state is function-local,
//! so concurrent calls over catalog clones are safe.

mod domain;
mod search;

pub use domain::ConflictReason;
pub use search::{SchedulingFailure, SolverConfig, SolverStats};

use crate::catalog::Catalog;
use crate::models::{Schedule, ScheduleEntry};
use crate::verify;

/// Generates a timetable for the catalog with default configuration.
///
/// Convenience form of [`TimetableSolver::solve`].
pub fn generate(catalog: &Catalog) -> Result<Schedule, SchedulingFailure> {
    TimetableSolver::new().solve(catalog)
}

/// Configurable timetable solver.
///
/// # Example
/// ```
/// use u_timetable::{Catalog, Course, Room, RoomType, TimeSlot, Day, TimetableSolver};
///
/// let catalog = Catalog::new(
///     vec![Course::new("math101").with_teacher("t003", "Dr. Brown")],
///     vec![TimeSlot::new("slot1", Day::Monday, 800, 900)],
///     vec![Room::new("r002", RoomType::Classroom, 40)],
/// ).unwrap();
///
/// let schedule = TimetableSolver::new().solve(&catalog).unwrap();
/// assert_eq!(schedule.entry_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SolverConfig,
}

impl TimetableSolver {
    /// Creates a solver with default configuration (unbounded search).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a backtrack ceiling. Exceeding it yields
    /// [`SchedulingFailure::BudgetExhausted`] instead of a proof of
    /// infeasibility.
    pub fn with_max_backtracks(mut self, max_backtracks: u64) -> Self {
        self.config.max_backtracks = Some(max_backtracks);
        self
    }

    /// Generates a timetable, discarding search statistics.
    pub fn solve(&self, catalog: &Catalog) -> Result<Schedule, SchedulingFailure> {
        self.solve_with_stats(catalog).0
    }

    /// Generates a timetable and reports search effort.
    pub fn solve_with_stats(
        &self,
        catalog: &Catalog,
    ) -> (Result<Schedule, SchedulingFailure>, SolverStats) {
        let result = search::run(catalog, &self.config);
        let schedule = match result.outcome {
            Ok(placements) => assemble(catalog, &placements),
            Err(failure) => Err(failure),
        };
        (schedule, result.stats)
    }
}

/// Hydrates raw index placements into schedule entries and defensively
/// re-verifies the result with the constraint evaluator instead of
/// trusting search state.
fn assemble(
    catalog: &Catalog,
    placements: &[(usize, domain::Candidate)],
) -> Result<Schedule, SchedulingFailure> {
    let mut schedule = Schedule::new();
    for &(course_idx, cand) in placements {
        schedule.add_entry(ScheduleEntry::new(
            catalog.courses()[course_idx].clone(),
            catalog.slots()[cand.slot].clone(),
            catalog.rooms()[cand.room].clone(),
        ));
    }

    let violations = verify::check_conflicts(&schedule, catalog);
    if !violations.is_empty() {
        return Err(SchedulingFailure::InvalidSolution { violations });
    }
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::models::{Course, Day, Room, RoomType, TimeSlot};
    use crate::verify::ViolationKind;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn five_course_catalog() -> Catalog {
        Catalog::new(
            vec![
                Course::new("cs101")
                    .with_teacher("t001", "Dr. Smith")
                    .with_duration(2)
                    .with_room_type(RoomType::ComputerLab),
                Course::new("cs102")
                    .with_teacher("t002", "Prof. Johnson")
                    .with_duration(2)
                    .with_room_type(RoomType::ComputerLab),
                Course::new("math101")
                    .with_teacher("t003", "Dr. Brown")
                    .with_duration(1)
                    .with_room_type(RoomType::Classroom),
                Course::new("math102")
                    .with_teacher("t004", "Prof. Davis")
                    .with_duration(2)
                    .with_room_type(RoomType::Classroom),
                Course::new("phy101")
                    .with_teacher("t005", "Dr. Wilson")
                    .with_duration(2)
                    .with_room_type(RoomType::PhysicsLab),
            ],
            vec![
                TimeSlot::new("slot1", Day::Monday, 800, 900),
                TimeSlot::new("slot2", Day::Monday, 900, 1000),
                TimeSlot::new("slot3", Day::Monday, 1000, 1200),
                TimeSlot::new("slot4", Day::Tuesday, 800, 900),
                TimeSlot::new("slot5", Day::Tuesday, 1000, 1200),
            ],
            vec![
                Room::new("r001", RoomType::ComputerLab, 30),
                Room::new("r002", RoomType::Classroom, 40),
                Room::new("r003", RoomType::PhysicsLab, 20),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_generate_produces_complete_schedule() {
        init_logging();
        let catalog = five_course_catalog();
        let schedule = generate(&catalog).unwrap();

        assert_eq!(schedule.entry_count(), 5);
        for course in catalog.courses() {
            assert!(
                schedule.entry_for_course(&course.id).is_some(),
                "course '{}' missing from schedule",
                course.id
            );
        }
    }

    #[test]
    fn test_generated_schedule_has_no_conflicts() {
        let catalog = five_course_catalog();
        let schedule = generate(&catalog).unwrap();
        assert!(verify::check_conflicts(&schedule, &catalog).is_empty());
    }

    #[test]
    fn test_generated_entries_satisfy_local_constraints() {
        let catalog = five_course_catalog();
        let schedule = generate(&catalog).unwrap();
        for entry in &schedule.entries {
            assert!(entry.course.duration_units <= entry.slot.duration_units());
            assert_eq!(entry.room.room_type, entry.course.required_room_type);
        }
    }

    #[test]
    fn test_generate_is_reentrant() {
        let catalog = five_course_catalog();
        let first = generate(&catalog).unwrap();
        let second = generate(&catalog).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_generation_over_clones() {
        let catalog = five_course_catalog();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cat = catalog.clone();
                std::thread::spawn(move || generate(&cat).unwrap())
            })
            .collect();
        let schedules: Vec<Schedule> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for s in &schedules {
            assert_eq!(*s, schedules[0]);
        }
    }

    #[test]
    fn test_solver_with_budget() {
        let catalog = five_course_catalog();
        // The scenario solves without backtracking, so even a zero
        // ceiling succeeds.
        let schedule = TimetableSolver::new()
            .with_max_backtracks(0)
            .solve(&catalog)
            .unwrap();
        assert_eq!(schedule.entry_count(), 5);
    }

    #[test]
    fn test_solve_with_stats() {
        let catalog = five_course_catalog();
        let (result, stats) = TimetableSolver::new().solve_with_stats(&catalog);
        assert!(result.is_ok());
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.backtracks, 0);
    }

    #[test]
    fn test_generated_assignments_replay_through_evaluator() {
        // The verifier aside, the engine's output must replay cleanly
        // through the raw constraint predicates one entry at a time.
        let catalog = five_course_catalog();
        let schedule = generate(&catalog).unwrap();

        let mut accepted = Vec::new();
        for entry in &schedule.entries {
            let course = catalog.course(&entry.course.id).unwrap();
            let slot = catalog.slot(&entry.slot.id).unwrap();
            let room = catalog.room(&entry.room.id).unwrap();
            assert!(constraints::fits(slot, course));
            assert!(constraints::matches(room, course));
            assert!(constraints::compatible(&accepted, &catalog, course, slot, room));
            accepted.push(entry.assignment());
        }
    }

    #[test]
    fn test_assemble_rejects_clashing_placements() {
        // The assembler re-verifies instead of trusting search state:
        // hand it two courses in the same slot and room.
        let catalog = five_course_catalog();
        let placements = vec![
            (0, domain::Candidate { slot: 2, room: 0 }), // cs101 -> slot3/r001
            (1, domain::Candidate { slot: 2, room: 0 }), // cs102 -> slot3/r001
        ];

        match assemble(&catalog, &placements) {
            Err(SchedulingFailure::InvalidSolution { violations }) => {
                assert!(violations
                    .iter()
                    .any(|v| v.kind == ViolationKind::RoomDoubleBooked));
            }
            other => panic!("expected InvalidSolution, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_failure_names_course() {
        init_logging();
        let catalog = Catalog::new(
            vec![
                Course::new("a").with_teacher("t1", "T").with_duration(2),
                Course::new("b").with_teacher("t1", "T").with_duration(2),
            ],
            vec![TimeSlot::new("s1", Day::Monday, 1000, 1200)],
            vec![
                Room::new("r1", RoomType::Classroom, 10),
                Room::new("r2", RoomType::Classroom, 10),
            ],
        )
        .unwrap();

        match generate(&catalog) {
            Err(SchedulingFailure::Unplaceable { course_id, .. }) => {
                assert!(course_id == "a" || course_id == "b");
            }
            other => panic!("expected Unplaceable, got {other:?}"),
        }
    }
}
