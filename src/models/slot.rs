//! Time slot model.
//!
//! Slots are the discrete time intervals courses can be placed into.
//! Times use a 24-hour clock encoding (1300 = 13:00); slot lengths are
//! whole hours, the same unit as course durations.

use serde::{Deserialize, Serialize};

/// A bookable time interval on a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Day of the week.
    pub day: Day,
    /// Start time, 24-hour clock encoding (e.g. 800 = 08:00).
    pub start_time: u32,
    /// End time, 24-hour clock encoding (exclusive).
    pub end_time: u32,
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(id: impl Into<String>, day: Day, start_time: u32, end_time: u32) -> Self {
        Self {
            id: id.into(),
            day,
            start_time,
            end_time,
        }
    }

    /// Slot length in whole hours, derived from the clock encoding.
    ///
    /// `1000..1200` → 2. Saturates to 0 when `end_time <= start_time`
    /// (such slots are rejected at catalog construction).
    #[inline]
    pub fn duration_units(&self) -> u32 {
        self.end_time.saturating_sub(self.start_time) / 100
    }
}

impl Day {
    /// Stable lowercase string form for display and export.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_duration() {
        let one_hour = TimeSlot::new("slot1", Day::Monday, 800, 900);
        assert_eq!(one_hour.duration_units(), 1);

        let two_hours = TimeSlot::new("slot3", Day::Monday, 1000, 1200);
        assert_eq!(two_hours.duration_units(), 2);
    }

    #[test]
    fn test_slot_duration_degenerate() {
        let empty = TimeSlot::new("bad", Day::Friday, 900, 900);
        assert_eq!(empty.duration_units(), 0);

        let inverted = TimeSlot::new("worse", Day::Friday, 1000, 800);
        assert_eq!(inverted.duration_units(), 0);
    }

    #[test]
    fn test_day_display() {
        assert_eq!(Day::Monday.as_str(), "monday");
        assert_eq!(Day::Tuesday.to_string(), "tuesday");
    }

    #[test]
    fn test_slot_serde_roundtrip() {
        let s = TimeSlot::new("slot5", Day::Tuesday, 1000, 1200);
        let json = serde_json::to_string(&s).unwrap();
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
