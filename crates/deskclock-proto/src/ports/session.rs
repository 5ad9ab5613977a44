use std::{fmt, sync::Arc};

use masterror::Error;

/// Error type returned by [`SessionPort`] actions.
///
/// Each variant stores the logical operation name to aid diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The provider does not expose the requested action.
    #[error("session operation `{operation}` is not supported by this provider")]
    Unsupported {
        /// Logical operation identifier.
        operation: &'static str,
    },
    /// The provider failed to carry out the action.
    #[error("session operation `{operation}` failed: {message}")]
    Backend {
        /// Logical operation identifier.
        operation: &'static str,
        /// Human readable error description.
        message: Arc<str>,
    },
    /// The provider state lock was poisoned by a panicking writer.
    #[error("session state is poisoned")]
    Poisoned,
}

impl SessionError {
    /// Helper for constructing [`SessionError::Unsupported`].
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Helper for constructing [`SessionError::Backend`].
    pub fn backend(operation: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }
}

/// Profile of the signed-in user. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Location of the user's avatar image.
    pub avatar_url: Option<String>,
    /// Account e-mail address.
    pub email: Option<String>,
}

/// Credit usage reported by the provider.
///
/// Values are taken as reported: they may be fractional, negative or inconsistent
/// (`remaining > allocated`). Consumers clamp when they need a bounded figure.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UsageRecord {
    /// Credits still available in the current period.
    pub remaining_credits: f64,
    /// Credits granted for the current period.
    pub allocated_credits: f64,
}

/// Plan the user is subscribed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Display name of the plan.
    pub name: String,
}

/// Subscription status reported by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionStatus {
    /// Plan details, if resolved.
    pub plan: Option<Plan>,
    /// Free-form status such as `active` or `canceled`.
    pub status: Option<String>,
}

/// Capability set consumed from the external authentication/subscription provider.
///
/// Implementations are injected explicitly wherever session state is needed. Data getters
/// return `None` while the provider has not resolved the value yet; callers render placeholders
/// for that state instead of treating it as an error. Nothing here is retried or validated by
/// the caller.
pub trait SessionPort: Send + Sync + fmt::Debug {
    /// Whether a user is currently signed in.
    fn is_signed_in(&self) -> bool;

    /// Start the provider's sign-in flow.
    fn sign_in(&self) -> Result<(), SessionError>;

    /// End the current session.
    fn sign_out(&self) -> Result<(), SessionError>;

    /// Profile of the signed-in user.
    fn user(&self) -> Option<UserProfile>;

    /// Credit usage of the signed-in user.
    fn usage(&self) -> Option<UsageRecord>;

    /// Subscription status of the signed-in user.
    fn subscription_status(&self) -> Option<SubscriptionStatus>;

    /// Whether [`subscribe`](SessionPort::subscribe) is available.
    fn supports_subscribe(&self) -> bool {
        false
    }

    /// Open the provider's subscribe/manage flow.
    fn subscribe(&self) -> Result<(), SessionError> {
        Err(SessionError::unsupported("subscribe"))
    }
}
