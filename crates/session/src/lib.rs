//! Session state for the ctb-web frontend.
//!
//! [`SessionSynchronizer`] keeps the persisted token and the cached user
//! identity reconciled against whichever API variant is active.
//! [`notify::Notifier`] drives the ephemeral UI notification queue.

pub mod config;
pub mod notify;
pub mod synchronizer;

pub use config::SessionConfig;
pub use notify::{Notification, NotificationKind, Notifier, Phase};
pub use synchronizer::{SessionState, SessionSynchronizer};
