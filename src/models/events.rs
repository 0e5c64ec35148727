use serde::{Deserialize, Serialize};

use super::booking::Booking;

/// One ranked candidate transcription. The top-ranked hypothesis is
/// authoritative; confidence is logged only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub utterance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Hypothesis {
    pub fn new(utterance: &str) -> Self {
        Self {
            utterance: utterance.to_string(),
            confidence: None,
        }
    }
}

/// Requests the engine sends to the external speech actor.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCommand {
    Prepare,
    Speak {
        utterance: String,
    },
    Listen {
        hints: Vec<String>,
        no_input_timeout_ms: u64,
        complete_timeout_ms: u64,
    },
}

/// Events the speech actor sends back. A `Recognised` or `NoInput` is
/// always followed by a `ListenComplete`.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Ready,
    SpeakComplete,
    ListenComplete,
    Recognised(Vec<Hypothesis>),
    NoInput,
}

/// Everything the dialogue transition function can react to: speech actor
/// events plus the single UI trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    /// User-initiated start/advance trigger.
    Advance,
    Ready,
    SpeakComplete,
    ListenComplete,
    Recognised(Vec<Hypothesis>),
    NoInput,
}

impl From<SpeechEvent> for DialogueEvent {
    fn from(event: SpeechEvent) -> Self {
        match event {
            SpeechEvent::Ready => DialogueEvent::Ready,
            SpeechEvent::SpeakComplete => DialogueEvent::SpeakComplete,
            SpeechEvent::ListenComplete => DialogueEvent::ListenComplete,
            SpeechEvent::Recognised(hypotheses) => DialogueEvent::Recognised(hypotheses),
            SpeechEvent::NoInput => DialogueEvent::NoInput,
        }
    }
}

/// Side effects requested by a transition, executed by the engine loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Speak(String),
    Listen,
    Record(Booking),
}
