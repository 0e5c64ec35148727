//! The dialogue controller: a pure transition function over the session
//! and a typed event union. All I/O is returned as effects and executed by
//! the engine loop.

use crate::models::{
    Booking, DialogueEvent, DialogueStep, Effect, Hypothesis, Lexicon, Session, TurnPhase,
};
use crate::services::nlu;

const NO_INPUT_PROMPT: &str = "I can't hear you!";

/// Prompt spoken on entering a step.
fn prompt(session: &Session) -> String {
    match session.step {
        DialogueStep::Idle => String::new(),
        DialogueStep::Greeting => "Hello! Let's book an appointment.".to_string(),
        DialogueStep::AskPerson => "Who do you want to meet?".to_string(),
        DialogueStep::AskDay => "On which day do you want to meet?".to_string(),
        DialogueStep::AskWholeDay => "Will the appointment take the whole day?".to_string(),
        DialogueStep::AskTime => "At what time do you want to meet?".to_string(),
        DialogueStep::Confirm => {
            let person = session.slots.person.as_deref().unwrap_or("someone");
            let day = session.slots.day.as_deref().unwrap_or("some day");
            match (&session.slots.time, session.slots.whole_day) {
                (_, true) => format!(
                    "Do you want me to create an appointment with {person} on {day} for the whole day?"
                ),
                (Some(time), _) => format!(
                    "Do you want me to create an appointment with {person} on {day} at {time}?"
                ),
                (None, false) => {
                    format!("Do you want me to create an appointment with {person} on {day}?")
                }
            }
        }
        DialogueStep::Created => String::new(),
    }
}

/// Clarification spoken when the utterance matched no slot for the step.
fn clarify(step: DialogueStep) -> &'static str {
    match step {
        DialogueStep::AskPerson => "Sorry, I don't know that person. Who do you want to meet?",
        DialogueStep::AskDay => "Sorry, I didn't catch the day. On which day do you want to meet?",
        DialogueStep::AskWholeDay => {
            "Please answer yes or no. Will the appointment take the whole day?"
        }
        DialogueStep::AskTime => {
            "Sorry, I didn't catch the time. At what time do you want to meet?"
        }
        DialogueStep::Confirm => "Please answer yes or no.",
        _ => "Sorry, I didn't understand.",
    }
}

fn is_ask_step(step: DialogueStep) -> bool {
    matches!(
        step,
        DialogueStep::AskPerson
            | DialogueStep::AskDay
            | DialogueStep::AskWholeDay
            | DialogueStep::AskTime
            | DialogueStep::Confirm
    )
}

fn enter(session: &mut Session, step: DialogueStep) -> Vec<Effect> {
    session.step = step;
    session.phase = TurnPhase::Speaking;
    vec![Effect::Speak(prompt(session))]
}

/// Advance the session by one event. Pure apart from the session mutation;
/// speaking, listening and booking recording are returned as effects.
pub fn transition(session: &mut Session, event: DialogueEvent, lexicon: &Lexicon) -> Vec<Effect> {
    match event {
        DialogueEvent::Ready => {
            session.ready = true;
            vec![]
        }

        DialogueEvent::Advance => match session.step {
            DialogueStep::Idle if session.ready => enter(session, DialogueStep::Greeting),
            DialogueStep::Created => {
                session.reset();
                enter(session, DialogueStep::Greeting)
            }
            _ => {
                tracing::debug!(step = session.step.as_str(), "ignoring advance trigger");
                vec![]
            }
        },

        DialogueEvent::SpeakComplete => match session.step {
            DialogueStep::Greeting => enter(session, DialogueStep::AskPerson),
            DialogueStep::Created => {
                session.phase = TurnPhase::Idle;
                vec![]
            }
            step if is_ask_step(step) && session.phase == TurnPhase::Speaking => {
                session.phase = TurnPhase::Listening;
                session.last_utterance = None;
                vec![Effect::Listen]
            }
            _ => vec![],
        },

        DialogueEvent::Recognised(hypotheses) => {
            if session.phase == TurnPhase::Listening {
                session.last_utterance = top_hypothesis(&hypotheses);
            }
            vec![]
        }

        DialogueEvent::NoInput => {
            session.last_utterance = None;
            vec![]
        }

        DialogueEvent::ListenComplete => {
            if session.phase != TurnPhase::Listening {
                return vec![];
            }
            session.phase = TurnPhase::Speaking;
            match session.last_utterance.take() {
                Some(utterance) => answer(session, &utterance, lexicon),
                None => vec![Effect::Speak(NO_INPUT_PROMPT.to_string())],
            }
        }
    }
}

fn top_hypothesis(hypotheses: &[Hypothesis]) -> Option<String> {
    let top = hypotheses.first()?;
    tracing::debug!(
        utterance = %top.utterance,
        confidence = ?top.confidence,
        alternates = hypotheses.len() - 1,
        "recognition result"
    );
    Some(top.utterance.clone())
}

/// Run the step's extractor against the utterance; fill the slot and
/// advance on a match, re-prompt otherwise.
fn answer(session: &mut Session, utterance: &str, lexicon: &Lexicon) -> Vec<Effect> {
    match session.step {
        DialogueStep::AskPerson => match nlu::extract_person(lexicon, utterance) {
            Some(person) => {
                session.slots.person = Some(person);
                enter(session, DialogueStep::AskDay)
            }
            None => reprompt(session),
        },

        DialogueStep::AskDay => match nlu::extract_day(lexicon, utterance) {
            Some(day) => {
                session.slots.day = Some(day);
                enter(session, DialogueStep::AskWholeDay)
            }
            None => reprompt(session),
        },

        DialogueStep::AskWholeDay => match nlu::extract_confirmation(utterance) {
            Some(true) => {
                session.slots.whole_day = true;
                session.slots.time = None;
                enter(session, DialogueStep::Confirm)
            }
            Some(false) => {
                session.slots.whole_day = false;
                enter(session, DialogueStep::AskTime)
            }
            None => reprompt(session),
        },

        DialogueStep::AskTime => match nlu::extract_time(lexicon, utterance) {
            Some(time) => {
                session.slots.time = Some(time);
                enter(session, DialogueStep::Confirm)
            }
            None => reprompt(session),
        },

        DialogueStep::Confirm => match nlu::extract_confirmation(utterance) {
            Some(true) => match Booking::from_slots(&session.slots) {
                Some(booking) => {
                    session.step = DialogueStep::Created;
                    session.phase = TurnPhase::Speaking;
                    vec![Effect::Speak(booking.summary()), Effect::Record(booking)]
                }
                None => {
                    // Slots cannot be incomplete here; restart if they are.
                    tracing::warn!("confirm reached with incomplete slots, restarting");
                    session.reset();
                    enter(session, DialogueStep::AskPerson)
                }
            },
            Some(false) => {
                session.reset();
                enter(session, DialogueStep::AskPerson)
            }
            None => reprompt(session),
        },

        _ => vec![],
    }
}

fn reprompt(session: &mut Session) -> Vec<Effect> {
    tracing::debug!(step = session.step.as_str(), "no slot match, re-prompting");
    vec![Effect::Speak(clarify(session.step).to_string())]
}
