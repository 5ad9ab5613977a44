mod format;
mod ticker;

use std::sync::Arc;

use deskclock_proto::{
    config::{ClockConfig, DisplayMode},
    ports::clock::{ClockPort, ClockReading},
};
use log::{debug, error, warn};

pub use format::{
    ClockFace, DateFormatError, DateFormatter, FormattedDate, FormattedTime, Period, display_hour,
    format_time,
};
pub use ticker::{TICK_INTERVAL, Ticker, TickerHandle};

use crate::{
    ModuleContext,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
};

/// Message type for GUI communication
#[derive(Debug, Clone)]
pub enum Message {
    /// A reading from the schedule started by activation number `generation`.
    Tick {
        generation: u64,
        reading:    ClockReading,
    },
    ToggleDisplayMode,
}

/// Clock module - business logic only, no GUI!
///
/// The module is inactive until registered. While active it owns exactly one running
/// [`TickerHandle`]; deactivating (or dropping the module) stops it. Each activation
/// starts a new generation, and only ticks of the current one are applied.
#[derive(Debug)]
pub struct Clock {
    ticker:     Ticker,
    reading:    ClockReading,
    mode:       DisplayMode,
    dates:      DateFormatter,
    running:    Option<TickerHandle>,
    generation: u64,
}

impl Clock {
    pub fn new(clock: Arc<dyn ClockPort>, config: &ClockConfig) -> Self {
        let dates = DateFormatter::new(&config.date_format, &config.locale).unwrap_or_else(|err| {
            warn!("Falling back to the default date format: {err}");
            DateFormatter::default()
        });

        Self {
            reading: clock.now(),
            ticker: Ticker::new(clock),
            mode: config.display_mode,
            dates,
            running: None,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn reading(&self) -> ClockReading {
        self.reading
    }

    /// Formatted strings for the current reading and mode.
    pub fn face(&self) -> ClockFace {
        ClockFace::render(&self.reading, self.mode, &self.dates)
    }

    /// Start ticking, replacing any schedule that is already running.
    pub fn activate(&mut self, ctx: &ModuleContext) {
        self.deactivate();

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        let sender = ctx.module_sender(ModuleEvent::Clock);
        let handle = self
            .ticker
            .start(ctx.runtime_handle(), move |reading| {
                if let Err(err) = sender.try_send(Message::Tick {
                    generation,
                    reading,
                }) {
                    error!("Failed to publish clock tick: {err}");
                }
            });

        self.reading = handle.baseline();
        self.running = Some(handle);
        debug!("Clock activated, ticking every {:?}", self.ticker.period());
    }

    /// Stop ticking. Ticks still queued on the bus are ignored afterwards, even if the
    /// clock is activated again before they are drained.
    pub fn deactivate(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.stop();
            debug!("Clock deactivated");
        }
    }

    /// Update clock state from GUI message
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick {
                generation,
                reading,
            } => {
                if self.is_active() && generation == self.generation {
                    self.reading = reading;
                } else {
                    debug!("Dropping stale tick {reading} from schedule #{generation}");
                }
            }
            Message::ToggleDisplayMode => {
                self.mode = self.mode.toggled();
            }
        }
    }
}

impl Module for Clock {
    type RegistrationData<'a> = ();

    fn register(
        &mut self,
        ctx: &ModuleContext,
        _data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        self.activate(ctx);
        Ok(())
    }

    fn deactivate(&mut self) {
        Clock::deactivate(self);
    }
}

#[cfg(test)]
mod tests {
    use std::{num::NonZeroUsize, time::Duration};

    use tokio::{runtime::Handle, time::sleep};

    use super::*;
    use crate::{
        event_bus::{BusEvent, EventBus, EventReceiver},
        test_utils::FixedClock,
    };

    fn context() -> (ModuleContext, EventReceiver) {
        let bus = EventBus::new(NonZeroUsize::new(32).expect("capacity"));
        let receiver = bus.receiver();
        (ModuleContext::new(bus.sender(), Handle::current()), receiver)
    }

    fn ticks(receiver: &mut EventReceiver) -> Vec<Message> {
        let mut ticks = Vec::new();
        while let Ok(Some(event)) = receiver.try_recv() {
            if let BusEvent::Module(ModuleEvent::Clock(tick @ Message::Tick { .. })) = event {
                ticks.push(tick);
            }
        }
        ticks
    }

    fn clock() -> Clock {
        Clock::new(
            Arc::new(FixedClock::stepping(FixedClock::new_year_2024(), 1)),
            &ClockConfig::default(),
        )
    }

    #[test]
    fn toggle_flips_display_mode_only() {
        let mut clock = Clock::new(
            Arc::new(FixedClock::new(FixedClock::new_year_2024())),
            &ClockConfig::default(),
        );
        let before = clock.reading();

        clock.update(Message::ToggleDisplayMode);
        assert_eq!(clock.mode(), DisplayMode::TwelveHour);
        assert_eq!(clock.face().time.to_string(), "12:00:00 AM");

        clock.update(Message::ToggleDisplayMode);
        assert_eq!(clock.mode(), DisplayMode::TwentyFourHour);
        assert_eq!(clock.face().time.to_string(), "00:00:00");
        assert_eq!(clock.reading(), before);
    }

    #[test]
    fn invalid_date_pattern_falls_back_to_default() {
        let config = ClockConfig {
            date_format: String::from("%Q"),
            ..ClockConfig::default()
        };
        let clock = Clock::new(
            Arc::new(FixedClock::new(FixedClock::new_year_2024())),
            &config,
        );

        assert_eq!(clock.face().date.as_str(), "Monday, January 1, 2024");
    }

    #[tokio::test(start_paused = true)]
    async fn activation_publishes_ticks_on_the_bus() {
        let (ctx, mut receiver) = context();
        let mut clock = clock();

        clock.register(&ctx, ()).expect("registered");
        assert!(clock.is_active());
        let baseline = clock.reading();

        sleep(Duration::from_millis(2_100)).await;
        let queued = ticks(&mut receiver);
        assert_eq!(queued.len(), 2);

        for tick in queued {
            clock.update(tick);
        }
        assert!(clock.reading() > baseline);

        clock.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn deactivation_freezes_state() {
        let (ctx, mut receiver) = context();
        let mut clock = clock();

        clock.activate(&ctx);
        sleep(Duration::from_millis(1_100)).await;
        let queued = ticks(&mut receiver);

        Module::deactivate(&mut clock);
        assert!(!clock.is_active());
        let frozen = clock.reading();

        // Ticks drained after teardown must not move the clock.
        for tick in queued {
            clock.update(tick);
        }

        sleep(Duration::from_secs(5)).await;
        assert!(ticks(&mut receiver).is_empty());
        assert_eq!(clock.reading(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn reactivation_replaces_the_running_schedule() {
        let (ctx, mut receiver) = context();
        let mut clock = clock();

        clock.activate(&ctx);
        clock.activate(&ctx);

        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(ticks(&mut receiver).len(), 1);

        clock.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_from_an_earlier_activation_are_ignored() {
        let (ctx, mut receiver) = context();
        let mut clock = clock();

        clock.activate(&ctx);
        sleep(Duration::from_millis(1_050)).await;
        clock.deactivate();
        clock.activate(&ctx);
        let restarted = clock.reading();

        let queued = ticks(&mut receiver);
        assert_eq!(queued.len(), 1);
        for tick in queued {
            clock.update(tick);
        }
        assert_eq!(clock.reading(), restarted);

        sleep(Duration::from_secs(1)).await;
        for tick in ticks(&mut receiver) {
            clock.update(tick);
        }
        assert!(clock.reading() > restarted);

        clock.deactivate();
    }
}
