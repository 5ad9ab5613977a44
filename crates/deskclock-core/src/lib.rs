//! Toolkit-independent state of the desk clock: ports adapters, the clock and session
//! modules, the event bus and the screen model rendered by the GUI crate.

pub mod adapters;
pub mod config;
pub mod event_bus;
pub mod module_context;
pub mod modules;
pub mod screen;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use module_context::{ModuleContext, ModuleEventSender};
