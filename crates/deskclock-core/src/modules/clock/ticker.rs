use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use deskclock_proto::ports::clock::{ClockPort, ClockReading};
use log::debug;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

/// Spacing between two readings.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Produces a [`ClockReading`] every [`TICK_INTERVAL`].
///
/// Ticks are not drift compensated: a late tick delays the following ones instead of
/// bunching them up.
#[derive(Debug, Clone)]
pub struct Ticker {
    clock:  Arc<dyn ClockPort>,
    period: Duration,
}

impl Ticker {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            period: TICK_INTERVAL,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Take a baseline reading and schedule the repeating ones on `runtime`.
    ///
    /// The baseline is captured before this returns and is exposed through
    /// [`TickerHandle::baseline`]; it is not passed to `on_tick`. Every later reading is
    /// handed to `on_tick` from the spawned task until the returned handle is stopped or
    /// dropped.
    pub fn start<F>(&self, runtime: &Handle, on_tick: F) -> TickerHandle
    where
        F: Fn(ClockReading) + Send + 'static,
    {
        let baseline = self.clock.now();
        let running = Arc::new(Mutex::new(true));

        let clock = Arc::clone(&self.clock);
        let period = self.period;
        let gate = Arc::clone(&running);

        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // Held while publishing so `stop` cannot return mid-tick.
                let delivered = {
                    let running = gate.lock().unwrap_or_else(PoisonError::into_inner);
                    if *running {
                        on_tick(clock.now());
                    }
                    *running
                };

                if !delivered {
                    break;
                }
            }
        });

        debug!("clock ticker started at {baseline}");

        TickerHandle {
            baseline,
            running,
            task: Some(task),
        }
    }
}

/// Scoped ownership of a running [`Ticker`] schedule.
///
/// Stopping is synchronous: once [`stop`](TickerHandle::stop) returns, or the handle has
/// been dropped, no further reading reaches the callback.
#[derive(Debug)]
pub struct TickerHandle {
    baseline: ClockReading,
    running:  Arc<Mutex<bool>>,
    task:     Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Reading captured when the ticker was started.
    pub fn baseline(&self) -> ClockReading {
        self.baseline
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel the schedule and release the timer task.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = false;

        if let Some(task) = self.task.take() {
            task.abort();
            debug!("clock ticker stopped");
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.halt();
    }
}
