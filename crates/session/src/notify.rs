//! Ephemeral UI notifications driven by a timed visibility state machine.
//!
//! Each notification walks `Scheduled -> Visible -> Hidden -> Retired` on
//! a timer chain. The chain is cancellable: dismissing a notification
//! tears its timers down instead of leaving them to fire against a retired
//! entry.

use crate::config::SessionConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Lifecycle phase of a single notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Queued, not yet shown.
    Scheduled,
    /// On screen.
    Visible,
    /// Fading out.
    Hidden,
    /// Done; kept out of [`Notifier::active`] snapshots.
    Retired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub phase: Phase,
}

struct Entry {
    notification: Notification,
    cancel: CancellationToken,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<Vec<Entry>>,
    // Plain counter guarded by the same turn-based access as the entries.
    next_id: Mutex<u64>,
}

/// The notification queue. Cheap to clone; all clones share one queue.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification and start its visibility timer chain.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let message = message.into();
        let cancel = CancellationToken::new();
        let id = {
            let mut next_id = self.inner.next_id.lock().expect("notifier lock");
            let id = *next_id;
            *next_id += 1;
            id
        };
        debug!(id, %message, "notification queued");
        self.inner
            .entries
            .lock()
            .expect("notifier lock")
            .push(Entry {
                notification: Notification {
                    id,
                    message,
                    kind,
                    phase: Phase::Scheduled,
                },
                cancel: cancel.clone(),
            });

        let notifier = self.clone();
        tokio::spawn(async move {
            let chain = [
                (SessionConfig::NOTIFY_SHOW_DELAY_MS, Phase::Visible),
                (SessionConfig::NOTIFY_VISIBLE_MS, Phase::Hidden),
                (SessionConfig::NOTIFY_FADE_MS, Phase::Retired),
            ];
            for (delay_ms, phase) in chain {
                tokio::select! {
                    () = cancel.cancelled() => return,
                    () = tokio::time::sleep(Duration::from_millis(delay_ms)) => {
                        notifier.set_phase(id, phase);
                    }
                }
            }
        });

        id
    }

    /// Cancel a notification's pending transitions and retire it now.
    pub fn dismiss(&self, id: u64) {
        let mut entries = self.inner.entries.lock().expect("notifier lock");
        if let Some(entry) = entries.iter_mut().find(|e| e.notification.id == id) {
            entry.cancel.cancel();
            entry.notification.phase = Phase::Retired;
            debug!(id, "notification dismissed");
        }
    }

    /// Snapshot of the non-retired notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .entries
            .lock()
            .expect("notifier lock")
            .iter()
            .filter(|e| e.notification.phase != Phase::Retired)
            .map(|e| e.notification.clone())
            .collect()
    }

    /// Current phase of a notification, if it ever existed.
    pub fn phase(&self, id: u64) -> Option<Phase> {
        self.inner
            .entries
            .lock()
            .expect("notifier lock")
            .iter()
            .find(|e| e.notification.id == id)
            .map(|e| e.notification.phase)
    }

    fn set_phase(&self, id: u64, phase: Phase) {
        let mut entries = self.inner.entries.lock().expect("notifier lock");
        if let Some(entry) = entries.iter_mut().find(|e| e.notification.id == id) {
            entry.notification.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle(ms: u64) {
        // Paused clock: sleeping auto-advances time and runs due timers.
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn chain_walks_every_phase() {
        let notifier = Notifier::new();
        let id = notifier.notify("saved", NotificationKind::Success);
        assert_eq!(notifier.phase(id), Some(Phase::Scheduled));

        settle(150).await;
        assert_eq!(notifier.phase(id), Some(Phase::Visible));

        settle(1500).await;
        assert_eq!(notifier.phase(id), Some(Phase::Hidden));

        settle(700).await;
        assert_eq!(notifier.phase(id), Some(Phase::Retired));
        assert!(notifier.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismissal_cancels_pending_timers() {
        let notifier = Notifier::new();
        let id = notifier.notify("login failed", NotificationKind::Failure);

        settle(150).await;
        assert_eq!(notifier.phase(id), Some(Phase::Visible));

        notifier.dismiss(id);
        assert_eq!(notifier.phase(id), Some(Phase::Retired));

        // The cancelled chain must not resurrect the entry.
        settle(5000).await;
        assert_eq!(notifier.phase(id), Some(Phase::Retired));
        assert!(notifier.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_unique_and_ordered() {
        let notifier = Notifier::new();
        let first = notifier.notify("one", NotificationKind::Success);
        let second = notifier.notify("two", NotificationKind::Failure);
        assert!(second > first);

        let active = notifier.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "one");
        assert_eq!(active[1].message, "two");
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_an_unknown_id_is_a_no_op() {
        let notifier = Notifier::new();
        notifier.dismiss(42);
        assert!(notifier.active().is_empty());
    }
}
