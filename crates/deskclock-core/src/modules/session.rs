mod usage;

use std::sync::Arc;

use deskclock_proto::ports::session::{
    SessionError, SessionPort, SubscriptionStatus, UsageRecord, UserProfile,
};
use log::{debug, error, info, warn};

pub use usage::{UsagePanel, fill_percent};

use crate::{
    ModuleContext, ModuleEventSender,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
};

/// Message type for GUI communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    SignIn,
    SignOut,
    Subscribe,
    /// Re-read everything from the provider.
    Refresh,
}

/// Provider state captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub signed_in:     bool,
    pub user:          Option<UserProfile>,
    pub usage:         Option<UsageRecord>,
    pub subscription:  Option<SubscriptionStatus>,
    pub can_subscribe: bool,
}

impl SessionSnapshot {
    pub fn capture(port: &dyn SessionPort) -> Self {
        if !port.is_signed_in() {
            return Self::default();
        }

        Self {
            signed_in:     true,
            user:          port.user(),
            usage:         port.usage(),
            subscription:  port.subscription_status(),
            can_subscribe: port.supports_subscribe(),
        }
    }
}

/// Gate in front of the clock, backed by an injected [`SessionPort`].
#[derive(Debug)]
pub struct Session {
    port:     Arc<dyn SessionPort>,
    snapshot: SessionSnapshot,
    sender:   Option<ModuleEventSender<Message>>,
}

impl Session {
    pub fn new(port: Arc<dyn SessionPort>) -> Self {
        let snapshot = SessionSnapshot::capture(port.as_ref());

        Self {
            port,
            snapshot,
            sender: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.snapshot.signed_in
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Update session state from GUI message
    pub fn update(&mut self, message: Message) {
        let outcome = match &message {
            Message::SignIn => self.port.sign_in(),
            Message::SignOut => self.port.sign_out(),
            Message::Subscribe => self.port.subscribe(),
            Message::Refresh => Ok(()),
        };

        match outcome {
            Ok(()) => debug!("Session action {message:?} completed"),
            Err(SessionError::Unsupported { operation }) => {
                info!("Session provider does not support `{operation}`");
            }
            Err(err) => warn!("Session action {message:?} failed: {err}"),
        }

        let previous = self.snapshot.signed_in;
        self.snapshot = SessionSnapshot::capture(self.port.as_ref());

        if previous != self.snapshot.signed_in {
            info!(
                "Session is now {}",
                if self.snapshot.signed_in {
                    "signed in"
                } else {
                    "signed out"
                }
            );
        }

        // Providers may resolve profile data after the action returns.
        if message != Message::Refresh
            && let Some(sender) = &self.sender
            && let Err(err) = sender.try_send(Message::Refresh)
        {
            error!("Failed to queue session refresh: {err}");
        }
    }
}

impl Module for Session {
    type RegistrationData<'a> = ();

    fn register(
        &mut self,
        ctx: &ModuleContext,
        _data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        self.sender = Some(ctx.module_sender(ModuleEvent::Session));
        self.snapshot = SessionSnapshot::capture(self.port.as_ref());
        ctx.request_redraw()?;
        Ok(())
    }

    fn deactivate(&mut self) {
        self.sender = None;
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use deskclock_proto::ports::session::Plan;
    use tokio::runtime::Runtime;

    use super::*;
    use crate::{
        event_bus::{BusEvent, EventBus},
        test_utils::MockSessionPort,
    };

    #[test]
    fn signed_out_snapshot_hides_provider_data() {
        let port = MockSessionPort::signed_out();
        *port.usage.lock().expect("usage lock") = Some(UsageRecord {
            remaining_credits: 1.0,
            allocated_credits: 2.0,
        });

        let session = Session::new(Arc::new(port));
        assert_eq!(session.snapshot(), &SessionSnapshot::default());
    }

    #[test]
    fn sign_in_and_out_round_trip_through_the_port() {
        let port = Arc::new(MockSessionPort::signed_out());
        let mut session = Session::new(port.clone());

        session.update(Message::SignIn);
        assert!(session.is_signed_in());
        assert_eq!(port.sign_in_calls(), 1);

        session.update(Message::SignOut);
        assert!(!session.is_signed_in());
        assert_eq!(port.sign_out_calls(), 1);
    }

    #[test]
    fn snapshot_copies_provider_data_when_signed_in() {
        let port = MockSessionPort::signed_in();
        *port.subscription.lock().expect("subscription lock") = Some(SubscriptionStatus {
            plan:   Some(Plan {
                name: "Pro".into(),
            }),
            status: Some("active".into()),
        });

        let session = Session::new(Arc::new(port));
        let snapshot = session.snapshot();

        assert!(snapshot.signed_in);
        assert_eq!(
            snapshot
                .subscription
                .as_ref()
                .and_then(|s| s.plan.as_ref())
                .map(|p| p.name.as_str()),
            Some("Pro")
        );
        assert!(!snapshot.can_subscribe);
    }

    #[test]
    fn failed_actions_keep_the_previous_state() {
        let port = Arc::new(MockSessionPort::signed_out());
        port.fail_actions();
        let mut session = Session::new(port.clone());

        session.update(Message::SignIn);

        assert!(!session.is_signed_in());
        assert_eq!(port.sign_in_calls(), 1);
    }

    #[test]
    fn unsupported_subscribe_is_not_fatal() {
        let port = Arc::new(MockSessionPort::signed_in());
        let mut session = Session::new(port.clone());

        session.update(Message::Subscribe);

        assert!(session.is_signed_in());
        assert_eq!(port.subscribe_calls(), 0);
    }

    #[test]
    fn actions_queue_a_refresh_once_registered() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let mut receiver = bus.receiver();
        let ctx = ModuleContext::new(bus.sender(), runtime.handle().clone());

        let mut session = Session::new(Arc::new(MockSessionPort::signed_out()));
        session.register(&ctx, ()).expect("registered");
        assert!(matches!(receiver.try_recv(), Ok(Some(BusEvent::Redraw))));

        session.update(Message::SignIn);
        assert!(matches!(
            receiver.try_recv(),
            Ok(Some(BusEvent::Module(ModuleEvent::Session(
                Message::Refresh
            ))))
        ));

        session.update(Message::Refresh);
        assert!(matches!(receiver.try_recv(), Ok(None)));
    }
}
