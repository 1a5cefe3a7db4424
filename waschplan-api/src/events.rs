use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/termine/stream", get(stream_events))
}

/// GET /v1/termine/stream
/// SSE stream of plan state changes, fed by the broadcast channel the
/// mutation handlers publish to. Lagged subscribers simply miss events.
async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|event| async move {
        match event {
            Ok(event) => Event::default()
                .json_data(&event)
                .ok()
                .map(Ok::<_, Infallible>),
            // Receiver lagged behind the channel capacity; skip
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
