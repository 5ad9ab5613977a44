//! Test doubles for the clock and session ports.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::{FixedOffset, TimeZone};
use deskclock_proto::ports::{
    clock::{ClockPort, ClockReading},
    session::{SessionError, SessionPort, SubscriptionStatus, UsageRecord, UserProfile},
};

/// [`ClockPort`] returning a scripted sequence of readings.
///
/// Every call to [`ClockPort::now`] advances the reading by `step` seconds.
#[derive(Debug)]
pub struct FixedClock {
    start: ClockReading,
    step:  i64,
    calls: AtomicUsize,
}

impl FixedClock {
    /// Always returns `start`.
    pub fn new(start: ClockReading) -> Self {
        Self::stepping(start, 0)
    }

    pub fn stepping(start: ClockReading, step_secs: i64) -> Self {
        Self {
            start,
            step: step_secs,
            calls: AtomicUsize::new(0),
        }
    }

    /// 2024-01-01 00:00:00 UTC, a Monday.
    pub fn new_year_2024() -> ClockReading {
        let at = FixedOffset::east_opt(0)
            .expect("utc offset")
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("unambiguous instant");
        ClockReading::new(at)
    }

    /// Number of readings handed out so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> ClockReading {
        let index = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
        ClockReading::new(*self.start.at() + chrono::Duration::seconds(index * self.step))
    }
}

/// Scriptable [`SessionPort`].
///
/// Provider data lives in public mutexes so tests can seed it. Actions are counted.
#[derive(Debug)]
pub struct MockSessionPort {
    pub user:         Mutex<Option<UserProfile>>,
    pub usage:        Mutex<Option<UsageRecord>>,
    pub subscription: Mutex<Option<SubscriptionStatus>>,
    signed_in:        AtomicBool,
    fail:             AtomicBool,
    subscribable:     AtomicBool,
    sign_in_calls:    AtomicUsize,
    sign_out_calls:   AtomicUsize,
    subscribe_calls:  AtomicUsize,
}

impl MockSessionPort {
    fn with_state(signed_in: bool) -> Self {
        Self {
            user:            Mutex::new(None),
            usage:           Mutex::new(None),
            subscription:    Mutex::new(None),
            signed_in:       AtomicBool::new(signed_in),
            fail:            AtomicBool::new(false),
            subscribable:    AtomicBool::new(false),
            sign_in_calls:   AtomicUsize::new(0),
            sign_out_calls:  AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self::with_state(false)
    }

    pub fn signed_in() -> Self {
        Self::with_state(true)
    }

    /// Make every subsequent action fail with a backend error.
    pub fn fail_actions(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn enable_subscribe(&self) {
        self.subscribable.store(true, Ordering::SeqCst);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    fn act(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(SessionError::backend(operation, "mock failure"))
        } else {
            Ok(())
        }
    }
}

impl SessionPort for MockSessionPort {
    fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    fn sign_in(&self) -> Result<(), SessionError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.act("sign_in")?;
        self.signed_in.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn sign_out(&self) -> Result<(), SessionError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.act("sign_out")?;
        self.signed_in.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn user(&self) -> Option<UserProfile> {
        self.user.lock().ok().and_then(|guard| guard.clone())
    }

    fn usage(&self) -> Option<UsageRecord> {
        self.usage.lock().ok().and_then(|guard| *guard)
    }

    fn subscription_status(&self) -> Option<SubscriptionStatus> {
        self.subscription.lock().ok().and_then(|guard| guard.clone())
    }

    fn supports_subscribe(&self) -> bool {
        self.subscribable.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> Result<(), SessionError> {
        if !self.supports_subscribe() {
            return Err(SessionError::unsupported("subscribe"));
        }

        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.act("subscribe")
    }
}
