//! Session timing constants.

/// Timing knobs for the session and notification state machines.
pub struct SessionConfig;

impl SessionConfig {
    /// Quiet period between a token write and the reconciling refresh.
    pub const REFRESH_DEBOUNCE_MS: u64 = 100;

    /// Delay before a queued notification becomes visible.
    pub const NOTIFY_SHOW_DELAY_MS: u64 = 100;

    /// How long a notification stays visible.
    pub const NOTIFY_VISIBLE_MS: u64 = 1500;

    /// Fade-out time before a hidden notification is retired.
    pub const NOTIFY_FADE_MS: u64 = 650;
}
