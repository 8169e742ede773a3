//! Course timetabling engine for the U-Engine ecosystem.
//!
//! Assigns courses to (time slot, room) pairs subject to hard
//! constraints, producing a conflict-free timetable or a precise
//! statement of infeasibility. Feasibility-only: the engine finds *a*
//! valid assignment or proves none exists; it carries no preference or
//! cost model.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `TimeSlot`, `Room`,
//!   `Assignment`, `ScheduleEntry`, `Schedule`
//! - **`catalog`**: Immutable per-run snapshot with structural
//!   validation (`CatalogError`)
//! - **`constraints`**: Pure predicates shared by search and
//!   verification
//! - **`solver`**: Backtracking search with forward checking and the
//!   `generate` port (`SchedulingFailure` on infeasibility)
//! - **`verify`**: Independent conflict scan over any schedule
//!   (`Violation`)
//!
//! # Example
//!
//! ```
//! use u_timetable::{generate, Catalog, Course, Day, Room, RoomType, TimeSlot};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         Course::new("cs101")
//!             .with_teacher("t001", "Dr. Smith")
//!             .with_duration(2)
//!             .with_room_type(RoomType::ComputerLab),
//!         Course::new("math101").with_teacher("t003", "Dr. Brown"),
//!     ],
//!     vec![
//!         TimeSlot::new("slot1", Day::Monday, 800, 900),
//!         TimeSlot::new("slot3", Day::Monday, 1000, 1200),
//!     ],
//!     vec![
//!         Room::new("r001", RoomType::ComputerLab, 30),
//!         Room::new("r002", RoomType::Classroom, 40),
//!     ],
//! )
//! .unwrap();
//!
//! let schedule = generate(&catalog).unwrap();
//! assert_eq!(schedule.entry_count(), 2);
//! assert!(u_timetable::check_conflicts(&schedule, &catalog).is_empty());
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6: Constraint Satisfaction Problems
//! - Dechter (2003), "Constraint Processing"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod catalog;
pub mod constraints;
pub mod models;
pub mod solver;
pub mod verify;

pub use catalog::{Catalog, CatalogError};
pub use models::{Assignment, Course, Day, Room, RoomType, Schedule, ScheduleEntry, TimeSlot};
pub use solver::{
    generate, ConflictReason, SchedulingFailure, SolverConfig, SolverStats, TimetableSolver,
};
pub use verify::{check_conflicts, Violation, ViolationKind};
