use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::errors::AppError;
use crate::models::SessionSnapshot;
use crate::state::AppState;

// GET /api/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.snapshot_rx.borrow().clone())
}

// POST /api/session/advance — the single UI trigger
pub async fn advance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .advance_tx
        .send(())
        .await
        .map_err(|_| AppError::EngineClosed)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

// GET /api/bookings
pub async fn get_bookings(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let bookings = state.bookings.lock().unwrap().clone();
    Json(serde_json::to_value(bookings).unwrap_or_default())
}

// GET /api/session/events — SSE stream of session snapshots
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    // Open with the current snapshot so late subscribers see state at once.
    let current = state.snapshot_rx.borrow().clone();
    let initial = tokio_stream::once(Ok::<_, Infallible>(snapshot_event(&current)));

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(snapshot) => Some(Ok(snapshot_event(&snapshot))),
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => None,
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = initial.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Sse::new(merged)
}

fn snapshot_event(snapshot: &SessionSnapshot) -> Event {
    let data = serde_json::to_string(snapshot).unwrap_or_default();
    Event::default().data(data).event("session")
}
