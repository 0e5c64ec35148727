pub mod booking;
pub mod events;
pub mod grammar;
pub mod session;

pub use booking::Booking;
pub use events::{DialogueEvent, Effect, Hypothesis, SpeechCommand, SpeechEvent};
pub use grammar::{Lexicon, LexiconError, SlotValue};
pub use session::{BookingSlots, DialogueStep, Session, SessionSnapshot, TurnPhase};
