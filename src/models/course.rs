//! Course model.
//!
//! A course is the unit of assignment: it must be placed into exactly
//! one (time slot, room) pair. Courses carry the teacher identity used
//! for clash detection and the room type they require.

use serde::{Deserialize, Serialize};

/// A course to be placed on the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Identifier of the teacher giving this course.
    pub teacher_id: String,
    /// Human-readable teacher name.
    pub teacher_name: String,
    /// Required contiguous teaching time, in whole hours.
    pub duration_units: u32,
    /// Kind of room this course must be held in.
    pub required_room_type: RoomType,
}

/// Room classification.
///
/// A course may only be placed in a room whose type equals its
/// `required_room_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// General-purpose lecture room.
    Classroom,
    /// Workstation-equipped lab.
    ComputerLab,
    /// Physics lab with experiment benches.
    PhysicsLab,
    /// Large-capacity hall.
    Auditorium,
    /// Domain-specific room kind.
    Custom(String),
}

impl Course {
    /// Creates a new course with the given ID.
    ///
    /// Defaults: one-hour duration, classroom required.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            teacher_id: String::new(),
            teacher_name: String::new(),
            duration_units: 1,
            required_room_type: RoomType::Classroom,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the teacher identity.
    pub fn with_teacher(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.teacher_id = id.into();
        self.teacher_name = name.into();
        self
    }

    /// Sets the duration in whole hours.
    pub fn with_duration(mut self, duration_units: u32) -> Self {
        self.duration_units = duration_units;
        self
    }

    /// Sets the required room type.
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.required_room_type = room_type;
        self
    }
}

impl RoomType {
    /// Stable string form for display and export.
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::Classroom => "classroom",
            RoomType::ComputerLab => "computer_lab",
            RoomType::PhysicsLab => "physics_lab",
            RoomType::Auditorium => "auditorium",
            RoomType::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
