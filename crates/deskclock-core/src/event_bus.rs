use std::{
    collections::VecDeque,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
};

use masterror::Error;

use crate::modules;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BusEvent {
    /// Re-render without any state change.
    Redraw,
    Module(ModuleEvent),
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        matches!((self, other), (BusEvent::Redraw, BusEvent::Redraw))
    }
}

/// Message addressed to one module, routed by the window loop.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ModuleEvent {
    Clock(modules::clock::Message),
    Session(modules::session::Message),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventBusError {
    #[error("event bus is full ({capacity} pending events)")]
    QueueFull { capacity: usize },
    #[error("event bus lock is poisoned")]
    Poisoned,
}

/// Shared queue state. Every handle of one bus points at the same instance.
#[derive(Debug)]
struct Queue {
    events:   Mutex<VecDeque<BusEvent>>,
    capacity: usize,
}

impl Queue {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            events:   Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity: capacity.get(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<BusEvent>>, EventBusError> {
        self.events.lock().map_err(|_| EventBusError::Poisoned)
    }

    /// Append `event` unless it merges into the newest queued one.
    ///
    /// Merging is checked first so a redraw request still succeeds on a full queue that
    /// already ends with one.
    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut events = self.lock()?;

        if events.back().is_some_and(|last| event.is_coalescable_with(last)) {
            return Ok(());
        }

        if events.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        events.push_back(event);
        Ok(())
    }
}

/// Bounded FIFO between background tasks and the window.
///
/// Clock ticks and session refreshes are produced off the UI thread; the window drains them
/// between frames. Consecutive redraw requests collapse into one entry.
///
/// ```
/// # use deskclock_core::event_bus::{BusEvent, EventBus};
/// # use std::num::NonZeroUsize;
/// let bus = EventBus::new(NonZeroUsize::new(2).expect("capacity"));
/// bus.publish(BusEvent::Redraw).expect("queued");
/// bus.publish(BusEvent::Redraw).expect("coalesced");
/// assert_eq!(bus.drain().expect("drained").len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    queue: Arc<Queue>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Arc::new(Queue::new(capacity)),
        }
    }

    /// Producer handle for background tasks.
    pub fn sender(&self) -> EventSender {
        EventSender {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Consumer handle for the window loop.
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.queue.push(event)
    }

    /// Remove and return everything queued, oldest first.
    pub fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        Ok(self.queue.lock()?.drain(..).collect())
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    queue: Arc<Queue>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.queue.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    queue: Arc<Queue>,
}

impl EventReceiver {
    /// Oldest queued event, or `None` when the queue is empty.
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        Ok(self.queue.lock()?.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::{clock, session},
        test_utils::FixedClock,
    };

    fn bus(capacity: usize) -> EventBus {
        EventBus::new(NonZeroUsize::new(capacity).expect("capacity"))
    }

    fn tick() -> BusEvent {
        BusEvent::Module(ModuleEvent::Clock(clock::Message::Tick {
            generation: 1,
            reading:    FixedClock::new_year_2024(),
        }))
    }

    #[test]
    fn full_queue_rejects_ticks() {
        let bus = bus(1);
        bus.publish(tick()).expect("first tick");

        assert_eq!(
            bus.publish(tick()).expect_err("queue full"),
            EventBusError::QueueFull { capacity: 1 }
        );
    }

    #[test]
    fn ticks_are_never_merged() {
        let bus = bus(4);
        bus.publish(tick()).expect("first");
        bus.publish(tick()).expect("second");

        assert_eq!(bus.drain().expect("drain").len(), 2);
    }

    #[test]
    fn redraw_merges_even_when_full() {
        let bus = bus(1);
        bus.publish(BusEvent::Redraw).expect("first redraw");
        bus.publish(BusEvent::Redraw).expect("merged redraw");

        assert_eq!(bus.drain().expect("drain").len(), 1);
    }

    #[test]
    fn receiver_sees_sender_events_in_order() {
        let bus = bus(4);
        let sender = bus.sender();
        let mut receiver = bus.receiver();

        sender.try_send(tick()).expect("tick");
        sender
            .try_send(BusEvent::Module(ModuleEvent::Session(
                session::Message::Refresh,
            )))
            .expect("refresh");

        assert!(matches!(
            receiver.try_recv(),
            Ok(Some(BusEvent::Module(ModuleEvent::Clock(_))))
        ));
        assert!(matches!(
            receiver.try_recv(),
            Ok(Some(BusEvent::Module(ModuleEvent::Session(_))))
        ));
        assert!(matches!(receiver.try_recv(), Ok(None)));
    }
}
