//! Server-sent stream of storage change events

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::StreamExt;

use crate::AppState;

/// Follow every write to the `ayurherb_` keys.
///
/// Each change arrives as a `storage` event with the key and new value. A
/// client that falls behind gets a `lagged` event and should reload.
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.api.subscribe())
        .filter_map(|result| match result {
            Ok(change) => match Event::default().event("storage").json_data(&change) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::error!(key = %change.key, error = %e, "Failed to encode change event");
                    None
                }
            },
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Change feed subscriber lagged");
                Some(Event::default().event("lagged").data(skipped.to_string()))
            }
        })
        .map(Ok);

    Sse::new(stream).keep_alive(KeepAlive::default())
}
