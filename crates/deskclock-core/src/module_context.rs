use std::{fmt, sync::Arc};

use tokio::runtime::Handle;

use crate::event_bus::{BusEvent, EventBusError, EventSender, ModuleEvent};

/// What a module receives when it becomes active.
///
/// Background work (the clock ticker, the subscribe command) runs on [`runtime_handle`]
/// and reports back to the window only through the bus sender held here. Publishing is
/// synchronous, so aborting one of those tasks never leaves a half-sent event behind.
///
/// [`runtime_handle`]: ModuleContext::runtime_handle
#[derive(Debug, Clone)]
pub struct ModuleContext {
    event_sender:   EventSender,
    runtime_handle: Handle,
}

impl ModuleContext {
    /// ```
    /// # use deskclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
    /// let ctx = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// # drop(ctx);
    /// ```
    pub fn new(event_sender: EventSender, runtime_handle: Handle) -> Self {
        Self {
            event_sender,
            runtime_handle,
        }
    }

    /// Runtime hosting module timers and commands.
    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    /// Ask the window to re-render. Repeated requests collapse into one.
    ///
    /// # Errors
    ///
    /// [`EventBusError::QueueFull`] when the bus has no room left.
    ///
    /// ```
    /// # use deskclock_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(1).expect("capacity"));
    /// let ctx = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// ctx.request_redraw().expect("queued");
    /// ctx.request_redraw().expect("merged with the pending redraw");
    /// ```
    pub fn request_redraw(&self) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Redraw)
    }

    /// Sender that wraps a module's own message type into a [`ModuleEvent`].
    ///
    /// ```
    /// # use deskclock_core::{event_bus::{EventBus, ModuleEvent}, module_context::ModuleContext};
    /// # use deskclock_core::modules::clock;
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(2).expect("capacity"));
    /// let ctx = ModuleContext::new(bus.sender(), runtime.handle().clone());
    ///
    /// let clock_events = ctx.module_sender(ModuleEvent::Clock);
    /// clock_events
    ///     .try_send(clock::Message::ToggleDisplayMode)
    ///     .expect("queued");
    /// ```
    pub fn module_sender<T, F>(&self, wrap: F) -> ModuleEventSender<T>
    where
        T: Send + 'static,
        F: Fn(T) -> ModuleEvent + Send + Sync + 'static,
    {
        ModuleEventSender {
            events: self.event_sender.clone(),
            wrap:   Arc::new(wrap),
        }
    }
}

/// Typed handle publishing one module's messages onto the bus.
pub struct ModuleEventSender<T> {
    events: EventSender,
    wrap:   Arc<dyn Fn(T) -> ModuleEvent + Send + Sync>,
}

impl<T> Clone for ModuleEventSender<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            wrap:   Arc::clone(&self.wrap),
        }
    }
}

impl<T> fmt::Debug for ModuleEventSender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEventSender")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<T> ModuleEventSender<T>
where
    T: Send + 'static,
{
    /// # Errors
    ///
    /// Propagates [`EventBusError`] when the message cannot be queued.
    pub fn try_send(&self, message: T) -> Result<(), EventBusError> {
        self.events
            .try_send(BusEvent::Module((self.wrap)(message)))
    }
}
