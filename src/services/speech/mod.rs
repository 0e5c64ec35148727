pub mod console;

use async_trait::async_trait;

use crate::models::SpeechCommand;

/// Boundary to the external speech actor. Commands are fire-and-forget;
/// completion and recognition events come back on the event channel the
/// actor was constructed with.
#[async_trait]
pub trait SpeechActor: Send + Sync {
    async fn send(&self, command: SpeechCommand) -> anyhow::Result<()>;
}
