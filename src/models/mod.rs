//! Timetabling domain models.
//!
//! Core data types for representing timetabling problems and solutions.
//! All types are immutable once loaded into a [`crate::catalog::Catalog`];
//! the engine never mutates domain data during search.

mod course;
mod room;
mod schedule;
mod slot;

pub use course::{Course, RoomType};
pub use room::Room;
pub use schedule::{Assignment, Schedule, ScheduleEntry};
pub use slot::{Day, TimeSlot};
