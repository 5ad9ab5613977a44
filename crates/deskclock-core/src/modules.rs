use std::borrow::Cow;

use masterror::Error;

use crate::{event_bus::EventBusError, module_context::ModuleContext};

pub mod clock;
pub mod session;

/// Why a clock or session module could not become active.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module could not publish on the event bus: {0}")]
    EventBus(#[from] EventBusError),
    /// The module refused to start, e.g. a gated screen without a session provider.
    #[error("module registration failed: {reason}")]
    Registration { reason: Cow<'static, str> },
}

impl ModuleError {
    pub fn registration(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Registration {
            reason: reason.into(),
        }
    }
}

/// Lifecycle shared by the modules composed into a screen.
///
/// The shell calls [`register`](Module::register) when a module's panel becomes visible, so
/// the clock starts its ticker only while it is on screen. [`deactivate`](Module::deactivate)
/// runs when the panel goes away and undoes everything `register` set up.
///
/// ```no_run
/// use deskclock_core::event_bus::ModuleEvent;
/// use deskclock_core::modules::{Module, ModuleError, session};
/// use deskclock_core::{ModuleContext, ModuleEventSender};
///
/// #[derive(Default)]
/// struct SessionWatcher {
///     sender: Option<ModuleEventSender<session::Message>>,
/// }
///
/// impl Module for SessionWatcher {
///     type RegistrationData<'a> = ();
///
///     fn register(
///         &mut self,
///         ctx: &ModuleContext,
///         _data: Self::RegistrationData<'_>,
///     ) -> Result<(), ModuleError> {
///         self.sender = Some(ctx.module_sender(ModuleEvent::Session));
///         Ok(())
///     }
///
///     fn deactivate(&mut self) {
///         self.sender = None;
///     }
/// }
/// ```
pub trait Module {
    type RegistrationData<'a>;

    fn register(
        &mut self,
        ctx: &ModuleContext,
        data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError>;

    /// Release whatever [`register`](Module::register) acquired. The default does nothing.
    fn deactivate(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_carries_reason() {
        let err = ModuleError::registration("no session provider");
        assert_eq!(
            err.to_string(),
            "module registration failed: no session provider"
        );
    }

    #[test]
    fn event_bus_errors_convert() {
        let err: ModuleError = EventBusError::QueueFull { capacity: 2 }.into();
        assert!(matches!(
            err,
            ModuleError::EventBus(EventBusError::QueueFull { capacity: 2 })
        ));
    }
}
