use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc, watch};

use crate::config::AppConfig;
use crate::models::{
    Booking, DialogueEvent, Effect, Lexicon, Session, SessionSnapshot, SpeechCommand, SpeechEvent,
};
use crate::services::dialogue;
use crate::services::speech::SpeechActor;

/// Single-task event loop owning the dialogue session. All session access
/// happens here; the rest of the process sees it through watch/broadcast
/// snapshots.
pub struct DialogueEngine {
    session: Session,
    lexicon: Lexicon,
    hints: Vec<String>,
    actor: Arc<dyn SpeechActor>,
    config: AppConfig,
    speech_rx: mpsc::Receiver<SpeechEvent>,
    advance_rx: mpsc::Receiver<()>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    events_tx: broadcast::Sender<SessionSnapshot>,
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl DialogueEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lexicon: Lexicon,
        actor: Arc<dyn SpeechActor>,
        config: AppConfig,
        speech_rx: mpsc::Receiver<SpeechEvent>,
        advance_rx: mpsc::Receiver<()>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
        events_tx: broadcast::Sender<SessionSnapshot>,
        bookings: Arc<Mutex<Vec<Booking>>>,
    ) -> Self {
        let hints = lexicon.keys();
        Self {
            session: Session::new(),
            lexicon,
            hints,
            actor,
            config,
            speech_rx,
            advance_rx,
            snapshot_tx,
            events_tx,
            bookings,
        }
    }

    pub async fn run(mut self) {
        if let Err(e) = self.actor.send(SpeechCommand::Prepare).await {
            tracing::error!(error = %e, "failed to prepare speech actor");
            return;
        }

        loop {
            // Actor events take priority over UI triggers so readiness is
            // observed before an early advance.
            let event = tokio::select! {
                biased;
                Some(event) = self.speech_rx.recv() => DialogueEvent::from(event),
                Some(()) = self.advance_rx.recv() => DialogueEvent::Advance,
                else => break,
            };
            self.dispatch(event).await;
        }

        tracing::info!("dialogue engine stopped");
    }

    async fn dispatch(&mut self, event: DialogueEvent) {
        tracing::debug!(event = ?event, step = self.session.step.as_str(), "dialogue event");
        let effects = dialogue::transition(&mut self.session, event, &self.lexicon);

        for effect in effects {
            match effect {
                Effect::Speak(utterance) => {
                    if let Err(e) = self
                        .actor
                        .send(SpeechCommand::Speak { utterance })
                        .await
                    {
                        tracing::error!(error = %e, "speak request failed");
                    }
                }
                Effect::Listen => {
                    let command = SpeechCommand::Listen {
                        hints: self.hints.clone(),
                        no_input_timeout_ms: self.config.asr_no_input_timeout_ms,
                        complete_timeout_ms: self.config.asr_complete_timeout_ms,
                    };
                    if let Err(e) = self.actor.send(command).await {
                        tracing::error!(error = %e, "listen request failed");
                    }
                }
                Effect::Record(booking) => {
                    tracing::info!(
                        person = %booking.person,
                        day = %booking.day,
                        time = booking.time.as_deref().unwrap_or("whole day"),
                        "appointment created"
                    );
                    self.bookings.lock().unwrap().push(booking);
                }
            }
        }

        let snapshot = self.session.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        // No subscribers is fine; the SSE stream may not be open.
        let _ = self.events_tx.send(snapshot);
    }
}
