use serde::{Deserialize, Serialize};

/// One conversation step of the booking dialogue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    Idle,
    Greeting,
    AskPerson,
    AskDay,
    AskWholeDay,
    AskTime,
    Confirm,
    Created,
}

impl DialogueStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueStep::Idle => "idle",
            DialogueStep::Greeting => "greeting",
            DialogueStep::AskPerson => "ask_person",
            DialogueStep::AskDay => "ask_day",
            DialogueStep::AskWholeDay => "ask_whole_day",
            DialogueStep::AskTime => "ask_time",
            DialogueStep::Confirm => "confirm",
            DialogueStep::Created => "created",
        }
    }

    /// Short title shown by the UI for the current step.
    pub fn title(&self) -> &'static str {
        match self {
            DialogueStep::Idle => "Ready to start",
            DialogueStep::Greeting => "Welcome",
            DialogueStep::AskPerson => "Who do you want to meet?",
            DialogueStep::AskDay => "Which day?",
            DialogueStep::AskWholeDay => "The whole day?",
            DialogueStep::AskTime => "What time?",
            DialogueStep::Confirm => "Confirm the appointment",
            DialogueStep::Created => "Appointment created",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            DialogueStep::Idle => "Press start to begin",
            DialogueStep::Greeting => "Starting a new booking",
            DialogueStep::AskPerson => "Say the name of a person",
            DialogueStep::AskDay => "Say a weekday, or today / tomorrow",
            DialogueStep::AskWholeDay => "Answer yes or no",
            DialogueStep::AskTime => "Say a time, e.g. 14:30 or 2:30 pm",
            DialogueStep::Confirm => "Answer yes or no",
            DialogueStep::Created => "Press start to book another",
        }
    }
}

/// Whether the engine is currently speaking, listening, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Speaking,
    Listening,
}

/// Booking fields accumulated over the dialogue. Fields are only ever set
/// by a successful extractor match for that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSlots {
    pub person: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub whole_day: bool,
}

impl BookingSlots {
    /// A confirmed booking needs a person, a day, and either the whole-day
    /// flag or a concrete time.
    pub fn complete(&self) -> bool {
        self.person.is_some() && self.day.is_some() && (self.whole_day || self.time.is_some())
    }
}

/// Mutable state for one booking attempt. Owned exclusively by the engine
/// task; discarded on restart.
#[derive(Debug, Clone)]
pub struct Session {
    pub step: DialogueStep,
    pub phase: TurnPhase,
    pub ready: bool,
    pub last_utterance: Option<String>,
    pub slots: BookingSlots,
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: DialogueStep::Idle,
            phase: TurnPhase::Idle,
            ready: false,
            last_utterance: None,
            slots: BookingSlots::default(),
        }
    }

    /// Drop everything collected so far, keeping actor readiness.
    pub fn reset(&mut self) {
        self.last_utterance = None;
        self.slots = BookingSlots::default();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            step: self.step.as_str().to_string(),
            title: self.step.title().to_string(),
            hint: self.step.hint().to_string(),
            listening: self.phase == TurnPhase::Listening,
            person: self.slots.person.clone().unwrap_or_else(placeholder),
            day: self.slots.day.clone().unwrap_or_else(placeholder),
            time: if self.slots.whole_day {
                "the whole day".to_string()
            } else {
                self.slots.time.clone().unwrap_or_else(placeholder)
            },
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder() -> String {
    "—".to_string()
}

/// Read-only view of the session for the UI: current step, listening
/// indicator and slot values with placeholder dashes when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub step: String,
    pub title: String,
    pub hint: String,
    pub listening: bool,
    pub person: String,
    pub day: String,
    pub time: String,
}
