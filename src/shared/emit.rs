use tokio::sync::broadcast;
use tracing::{debug, warn};
use super::events::AppEvent;

const EVENT_CAPACITY: usize = 16;

/// In-process broadcast channel between the settings page and the session.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit an application event to every listener.
///
/// Nobody listening is not an error: the content side may not be loaded yet.
pub fn emit_event(bus: &EventBus, event: AppEvent) {
    match bus.sender.send(event.clone()) {
        Ok(receivers) => debug!(?event, receivers, "event emitted"),
        Err(_) => warn!(?event, "event emitted with no listeners"),
    }
}
