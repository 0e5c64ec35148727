use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::SpeechActor;
use crate::models::{Hypothesis, SpeechCommand, SpeechEvent};

/// Local-development speech actor. Synthesis is a log line followed by an
/// immediate `SpeakComplete`; recognition is fed through an injection
/// channel (the dev endpoint) and times out to `NoInput` otherwise.
pub struct ConsoleSpeechActor {
    events: mpsc::Sender<SpeechEvent>,
    injected: Arc<Mutex<mpsc::Receiver<String>>>,
    listen_task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleSpeechActor {
    /// Returns the actor plus the sender used to inject recognized
    /// utterances.
    pub fn new(events: mpsc::Sender<SpeechEvent>) -> (Self, mpsc::Sender<String>) {
        let (inject_tx, inject_rx) = mpsc::channel(32);
        let actor = Self {
            events,
            injected: Arc::new(Mutex::new(inject_rx)),
            listen_task: std::sync::Mutex::new(None),
        };
        (actor, inject_tx)
    }

    fn replace_listen_task(&self, task: Option<JoinHandle<()>>) {
        let mut slot = self.listen_task.lock().unwrap();
        // A new listen supersedes the previous one.
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = task;
    }
}

#[async_trait]
impl SpeechActor for ConsoleSpeechActor {
    async fn send(&self, command: SpeechCommand) -> anyhow::Result<()> {
        match command {
            SpeechCommand::Prepare => {
                tracing::info!("console speech actor ready");
                self.events
                    .send(SpeechEvent::Ready)
                    .await
                    .context("speech event channel closed")?;
            }
            SpeechCommand::Speak { utterance } => {
                tracing::info!(%utterance, "tts");
                self.events
                    .send(SpeechEvent::SpeakComplete)
                    .await
                    .context("speech event channel closed")?;
            }
            SpeechCommand::Listen {
                no_input_timeout_ms,
                ..
            } => {
                let events = self.events.clone();
                let injected = Arc::clone(&self.injected);
                let task = tokio::spawn(async move {
                    let recognised = {
                        let mut rx = injected.lock().await;
                        tokio::time::timeout(
                            Duration::from_millis(no_input_timeout_ms),
                            rx.recv(),
                        )
                        .await
                    };
                    match recognised {
                        Ok(Some(utterance)) => {
                            tracing::info!(%utterance, "asr");
                            let _ = events
                                .send(SpeechEvent::Recognised(vec![Hypothesis::new(&utterance)]))
                                .await;
                        }
                        Ok(None) | Err(_) => {
                            let _ = events.send(SpeechEvent::NoInput).await;
                        }
                    }
                    let _ = events.send(SpeechEvent::ListenComplete).await;
                });
                self.replace_listen_task(Some(task));
            }
        }
        Ok(())
    }
}
