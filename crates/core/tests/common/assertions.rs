//! Custom assertion helpers over emitted events.

use pcs_protocol::ipc::Event;
use pcs_protocol::status_models::InstanceStatus;
use tokio::sync::mpsc;

/// Drain every event currently buffered in the channel.
pub fn drain_events(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Whether the events contain a StatusUpdate with the given status.
pub fn has_status_update(events: &[Event], status: InstanceStatus) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::StatusUpdate {
                status: s,
                ..
            } if *s == status
        )
    })
}

/// The reason carried by the first StageFailed event, if any.
pub fn failure_reason(events: &[Event]) -> Option<&str> {
    events.iter().find_map(|e| match e {
        Event::StageFailed { reason, .. } => Some(reason.as_str()),
        _ => None,
    })
}

/// Assert the start/finish event sequence of a single stage run.
///
/// Checks that:
/// 1. StageStarted comes first
/// 2. StageCompleted or StageFailed comes last
pub fn assert_stage_event_sequence(events: &[Event]) {
    assert!(!events.is_empty(), "Event sequence is empty");

    assert!(
        matches!(events[0], Event::StageStarted { .. }),
        "First event should be StageStarted, got: {:?}",
        events[0]
    );

    let last = &events[events.len() - 1];
    assert!(
        matches!(last, Event::StageCompleted { .. } | Event::StageFailed { .. }),
        "Last event should be StageCompleted or StageFailed, got: {last:?}"
    );
}
