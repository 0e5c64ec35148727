use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::session::BookingSlots;

/// A completed appointment. Held in process memory only; there is no
/// persistence across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub person: String,
    pub day: String,
    pub time: Option<String>,
    pub whole_day: bool,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Assemble a booking from filled slots. Returns `None` unless the
    /// slot invariant holds (person, day, and whole-day or time).
    pub fn from_slots(slots: &BookingSlots) -> Option<Self> {
        if !slots.complete() {
            return None;
        }
        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            person: slots.person.clone()?,
            day: slots.day.clone()?,
            time: if slots.whole_day {
                None
            } else {
                slots.time.clone()
            },
            whole_day: slots.whole_day,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }

    /// Spoken summary for the terminal step.
    pub fn summary(&self) -> String {
        match &self.time {
            Some(time) => format!(
                "You have made an appointment with {} on {} at {}.",
                self.person, self.day, time
            ),
            None => format!(
                "You have made an appointment with {} on {} for the whole day.",
                self.person, self.day
            ),
        }
    }
}
