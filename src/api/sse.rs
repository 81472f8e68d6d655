//! Server-Sent Events support

use crate::demo::DemoSnapshot;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Init snapshot first, then one event per state change.
pub fn sse_stream(
    init: DemoSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<DemoSnapshot>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(snapshot_event("init", &init)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(snapshot) => Some(Ok(snapshot_event("snapshot", &snapshot))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn snapshot_event(event_type: &str, snapshot: &DemoSnapshot) -> Event {
    let data = json!({
        "type": event_type,
        "snapshot": snapshot
    });

    Event::default().event(event_type).data(data.to_string())
}
