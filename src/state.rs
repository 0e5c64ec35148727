use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc, watch};

use crate::config::AppConfig;
use crate::models::{Booking, SessionSnapshot};

pub struct AppState {
    pub config: AppConfig,
    /// The single UI trigger ("start/advance").
    pub advance_tx: mpsc::Sender<()>,
    /// Latest session snapshot, kept current by the engine task.
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    /// Snapshot fan-out for the SSE stream.
    pub events_tx: broadcast::Sender<SessionSnapshot>,
    pub bookings: Arc<Mutex<Vec<Booking>>>,
    /// Dev-mode recognition injection; `None` when a real actor is wired.
    pub inject_tx: Option<mpsc::Sender<String>>,
}
