use std::sync::{Arc, Mutex};

use deskclock_core::{
    ModuleContext,
    config::Config,
    event_bus::{EventReceiver, EventSender},
    modules::{clock, session},
    screen::Shell,
};
use iced::Task;
use log::{error, info};
use tokio::runtime::Handle;

use super::{bus::BusFlushOutcome, micro_ticker::MicroTicker};

pub struct App {
    pub(super) bus_receiver:   Arc<Mutex<EventReceiver>>,
    pub(super) micro_ticker:   MicroTicker,
    pub(super) module_context: ModuleContext,
    pub(super) shell:          Shell,
    pub config:                Config,
}

#[derive(Debug, Clone)]
pub enum Message {
    None,
    MicroTick,
    BusFlushed(BusFlushOutcome),
    Clock(clock::Message),
    Session(session::Message),
}

impl App {
    pub fn new(
        (config, shell, event_sender, runtime_handle, bus_receiver): (
            Config,
            Shell,
            EventSender,
            Handle,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let module_context = ModuleContext::new(event_sender, runtime_handle);
            let mut app = App {
                bus_receiver: Arc::new(Mutex::new(bus_receiver)),
                micro_ticker: MicroTicker::default(),
                module_context,
                shell,
                config,
            };

            app.register_modules();

            (app, Task::none())
        }
    }

    fn register_modules(&mut self) {
        info!("Starting the {:?} variant", self.shell.variant());

        if let Err(err) = self.shell.register(&self.module_context) {
            error!("Failed to register modules: {err}");
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }
}
