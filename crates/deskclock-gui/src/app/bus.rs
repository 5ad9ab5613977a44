use std::sync::{Arc, Mutex};

use deskclock_core::event_bus::{BusEvent, EventReceiver};
use log::error;

/// Events pulled off the bus in one pass.
#[derive(Debug, Clone)]
pub struct BusFlushOutcome {
    events:    Vec<BusEvent>,
    had_error: bool,
}

impl BusFlushOutcome {
    pub(super) fn with_events(events: Vec<BusEvent>, had_error: bool) -> Self {
        Self {
            events,
            had_error,
        }
    }

    pub(super) fn had_error(&self) -> bool {
        self.had_error
    }

    pub(super) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(super) fn into_events(self) -> Vec<BusEvent> {
        self.events
    }
}

/// Take everything currently queued on the bus. Never waits for new events.
///
/// A poisoned receiver or a failed read ends the pass early; events read before the
/// failure are still returned.
pub(super) async fn drain_bus(receiver: Arc<Mutex<EventReceiver>>) -> BusFlushOutcome {
    let Ok(mut receiver) = receiver.lock() else {
        error!("cannot drain the event bus: receiver lock is poisoned");
        return BusFlushOutcome::with_events(Vec::new(), true);
    };

    let mut events = Vec::new();
    let had_error = loop {
        match receiver.try_recv() {
            Ok(Some(event)) => events.push(event),
            Ok(None) => break false,
            Err(err) => {
                error!("stopped draining the event bus: {err}");
                break true;
            }
        }
    };

    BusFlushOutcome::with_events(events, had_error)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use deskclock_core::{
        event_bus::{EventBus, ModuleEvent},
        modules::clock,
    };

    use super::*;

    #[tokio::test]
    async fn drains_in_publish_order() {
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let receiver = Arc::new(Mutex::new(bus.receiver()));

        bus.publish(BusEvent::Redraw).expect("redraw");
        bus.publish(BusEvent::Module(ModuleEvent::Clock(
            clock::Message::ToggleDisplayMode,
        )))
        .expect("toggle");

        let outcome = drain_bus(Arc::clone(&receiver)).await;
        assert!(!outcome.had_error());

        let events = outcome.into_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], BusEvent::Redraw));
        assert!(matches!(
            events[1],
            BusEvent::Module(ModuleEvent::Clock(clock::Message::ToggleDisplayMode))
        ));

        assert!(drain_bus(receiver).await.is_empty());
    }
}
