use std::sync::{Arc, RwLock};

use deskclock_proto::{
    config::SessionConfig,
    ports::session::{
        Plan, SessionError, SessionPort, SubscriptionStatus, UsageRecord, UserProfile,
    },
};
use log::info;
use tokio::runtime::Handle;

use crate::utils::launcher;

const SIGN_IN_OP: &str = "sign_in";
const SIGN_OUT_OP: &str = "sign_out";
const SUBSCRIBE_OP: &str = "subscribe";

/// [`SessionPort`] that serves a profile from the configuration file.
///
/// It starts signed out. Signing in exposes the configured profile, usage and plan; fields
/// left out of the configuration stay absent. The subscribe action runs the configured shell
/// command in the background.
#[derive(Debug)]
pub struct LocalSession {
    signed_in: RwLock<bool>,
    profile:   SessionConfig,
    runtime:   Handle,
}

impl LocalSession {
    pub fn new(profile: SessionConfig, runtime: Handle) -> Self {
        Self {
            signed_in: RwLock::new(false),
            profile,
            runtime,
        }
    }

    fn set_signed_in(&self, operation: &'static str, value: bool) -> Result<(), SessionError> {
        let mut signed_in = self.signed_in.write().map_err(|_| SessionError::Poisoned)?;

        if *signed_in == value {
            return Err(SessionError::backend(
                operation,
                if value {
                    "already signed in"
                } else {
                    "not signed in"
                },
            ));
        }

        *signed_in = value;
        info!(
            "Local session {}",
            if value { "signed in" } else { "signed out" }
        );
        Ok(())
    }
}

impl SessionPort for LocalSession {
    fn is_signed_in(&self) -> bool {
        self.signed_in.read().map(|guard| *guard).unwrap_or(false)
    }

    fn sign_in(&self) -> Result<(), SessionError> {
        self.set_signed_in(SIGN_IN_OP, true)
    }

    fn sign_out(&self) -> Result<(), SessionError> {
        self.set_signed_in(SIGN_OUT_OP, false)
    }

    fn user(&self) -> Option<UserProfile> {
        if !self.is_signed_in() {
            return None;
        }

        let profile = UserProfile {
            avatar_url: self.profile.avatar_url.clone(),
            email:      self.profile.email.clone(),
        };

        (profile != UserProfile::default()).then_some(profile)
    }

    fn usage(&self) -> Option<UsageRecord> {
        if !self.is_signed_in() {
            return None;
        }

        match (
            self.profile.remaining_credits,
            self.profile.allocated_credits,
        ) {
            (None, None) => None,
            (remaining, allocated) => Some(UsageRecord {
                remaining_credits: remaining.unwrap_or(0.0),
                allocated_credits: allocated.unwrap_or(0.0),
            }),
        }
    }

    fn subscription_status(&self) -> Option<SubscriptionStatus> {
        if !self.is_signed_in() {
            return None;
        }

        let status = SubscriptionStatus {
            plan:   self.profile.plan.clone().map(|name| Plan {
                name,
            }),
            status: self.profile.status.clone(),
        };

        (status != SubscriptionStatus::default()).then_some(status)
    }

    fn supports_subscribe(&self) -> bool {
        self.profile.subscribe_command.is_some()
    }

    fn subscribe(&self) -> Result<(), SessionError> {
        let command = self
            .profile
            .subscribe_command
            .as_deref()
            .ok_or(SessionError::unsupported(SUBSCRIBE_OP))?;

        if !self.is_signed_in() {
            return Err(SessionError::backend(SUBSCRIBE_OP, "not signed in"));
        }

        let _task = launcher::execute_command(&self.runtime, Arc::from(command), SUBSCRIBE_OP);
        Ok(())
    }
}
