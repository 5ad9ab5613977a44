//! Composition of the clock and session modules into what the window shows.
//!
//! [`Shell`] owns the modules and keeps the clock's ticker alive exactly while the clock is
//! part of the visible [`Screen`].

use deskclock_proto::config::{DisplayMode, Variant};
use log::info;

use crate::{
    ModuleContext,
    modules::{
        Module, ModuleError,
        clock::{self, Clock, ClockFace},
        session::{self, Session, SessionSnapshot, UsagePanel},
    },
};

pub const APP_TITLE: &str = "Digital Clock App";
pub const SIGN_IN_MESSAGE: &str = "Please sign in to access the clock and features";
pub const SIGN_IN_LABEL: &str = "Sign In";
pub const SIGN_OUT_LABEL: &str = "Sign Out";
pub const MANAGE_SUBSCRIPTION_LABEL: &str = "Manage Subscription";
pub const PLAN_CARD_TITLE: &str = "Plan Status";
pub const USAGE_CARD_TITLE: &str = "Usage";
pub const SUBSCRIPTION_CARD_TITLE: &str = "Subscription";
pub const DEFAULT_PLAN_NAME: &str = "Free";
pub const DEFAULT_PLAN_STATUS: &str = "none";

/// Prompt shown instead of the clock while nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInPrompt {
    pub title:        &'static str,
    pub message:      &'static str,
    pub action_label: &'static str,
}

impl Default for SignInPrompt {
    fn default() -> Self {
        Self {
            title:        APP_TITLE,
            message:      SIGN_IN_MESSAGE,
            action_label: SIGN_IN_LABEL,
        }
    }
}

/// Clock display plus its 12/24-hour toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockPanel {
    pub face:         ClockFace,
    pub toggle_label: &'static str,
}

impl ClockPanel {
    fn new(face: ClockFace) -> Self {
        let toggle_label = match face.mode {
            DisplayMode::TwentyFourHour => "Switch to 12-hour",
            DisplayMode::TwelveHour => "Switch to 24-hour",
        };

        Self {
            face,
            toggle_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    pub avatar_url: Option<String>,
    pub email:      String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCard {
    pub name:   String,
    pub status: String,
}

/// Signed-in layout of the gated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub identity:   IdentitySummary,
    pub clock:      ClockPanel,
    pub plan:       PlanCard,
    pub usage:      UsagePanel,
    pub can_manage: bool,
}

impl Dashboard {
    fn new(snapshot: &SessionSnapshot, clock: ClockPanel) -> Self {
        let user = snapshot.user.as_ref();
        let subscription = snapshot.subscription.as_ref();

        Self {
            identity: IdentitySummary {
                avatar_url: user.and_then(|u| u.avatar_url.clone()),
                email:      user.and_then(|u| u.email.clone()).unwrap_or_default(),
            },
            clock,
            plan: PlanCard {
                name:   subscription
                    .and_then(|s| s.plan.as_ref())
                    .map_or_else(|| DEFAULT_PLAN_NAME.to_owned(), |p| p.name.clone()),
                status: subscription
                    .and_then(|s| s.status.clone())
                    .unwrap_or_else(|| DEFAULT_PLAN_STATUS.to_owned()),
            },
            usage: UsagePanel::from_usage(snapshot.usage.as_ref()),
            can_manage: snapshot.can_subscribe,
        }
    }
}

/// Everything a single frame renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    SignIn(SignInPrompt),
    Clock(ClockPanel),
    Dashboard(Box<Dashboard>),
}

impl Screen {
    /// The clock subtree, when one is shown.
    pub fn clock(&self) -> Option<&ClockPanel> {
        match self {
            Screen::SignIn(_) => None,
            Screen::Clock(panel) => Some(panel),
            Screen::Dashboard(dashboard) => Some(&dashboard.clock),
        }
    }

    pub fn is_sign_in(&self) -> bool {
        matches!(self, Screen::SignIn(_))
    }
}

/// Owns the modules for one window and drives their lifecycle.
#[derive(Debug)]
pub struct Shell {
    clock:   Clock,
    session: Option<Session>,
}

impl Shell {
    /// Build the shell for `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Registration`] when the gated variant is requested without a
    /// session provider.
    pub fn new(
        variant: Variant,
        clock: Clock,
        session: Option<Session>,
    ) -> Result<Self, ModuleError> {
        let session = match (variant, session) {
            (Variant::Standalone, _) => None,
            (Variant::Gated, Some(session)) => Some(session),
            (Variant::Gated, None) => {
                return Err(ModuleError::registration(
                    "the gated variant needs a session provider",
                ));
            }
        };

        Ok(Self {
            clock,
            session,
        })
    }

    pub fn variant(&self) -> Variant {
        if self.session.is_some() {
            Variant::Gated
        } else {
            Variant::Standalone
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn clock_visible(&self) -> bool {
        self.session.as_ref().is_none_or(Session::is_signed_in)
    }

    /// Register modules with the runtime context.
    pub fn register(&mut self, ctx: &ModuleContext) -> Result<(), ModuleError> {
        if let Some(session) = self.session.as_mut() {
            session.register(ctx, ())?;
        }

        self.sync_clock(ctx)
    }

    /// Start or stop the clock so it ticks exactly while it is visible.
    fn sync_clock(&mut self, ctx: &ModuleContext) -> Result<(), ModuleError> {
        match (self.clock_visible(), self.clock.is_active()) {
            (true, false) => {
                info!("Clock entered the screen");
                self.clock.register(ctx, ())
            }
            (false, true) => {
                info!("Clock left the screen");
                Module::deactivate(&mut self.clock);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn update_clock(&mut self, message: clock::Message) {
        self.clock.update(message);
    }

    pub fn update_session(
        &mut self,
        ctx: &ModuleContext,
        message: session::Message,
    ) -> Result<(), ModuleError> {
        match self.session.as_mut() {
            Some(session) => session.update(message),
            None => {
                info!("Ignoring session message {message:?} in the standalone variant");
                return Ok(());
            }
        }

        self.sync_clock(ctx)
    }

    /// Release every module resource.
    pub fn teardown(&mut self) {
        Module::deactivate(&mut self.clock);

        if let Some(session) = self.session.as_mut() {
            session.deactivate();
        }
    }

    pub fn screen(&self) -> Screen {
        let clock = || ClockPanel::new(self.clock.face());

        match &self.session {
            None => Screen::Clock(clock()),
            Some(session) if !session.is_signed_in() => Screen::SignIn(SignInPrompt::default()),
            Some(session) => Screen::Dashboard(Box::new(Dashboard::new(session.snapshot(), clock()))),
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.teardown();
    }
}
