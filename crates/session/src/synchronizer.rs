//! Reconciliation between the stored token and the cached user identity.

use crate::config::SessionConfig;
use arc_swap::{ArcSwap, ArcSwapOption};
use ctb_core::{ApiError, ApiResult, CookieJar, CtbWebApi, StoreError, UserData};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token, no user.
    Anonymous,
    /// A token exists but has not been reconciled yet.
    Pending,
    /// The token was confirmed and the user snapshot is current.
    Authenticated,
    /// The stored token was rejected on re-validation.
    Invalid,
}

struct Inner {
    api: Arc<dyn CtbWebApi>,
    jar: Arc<CookieJar>,
    userdata: ArcSwapOption<UserData>,
    state: ArcSwap<SessionState>,
    /// Serializes reconciliations so a slow refresh cannot clobber the
    /// outcome of a later one.
    refresh_lock: tokio::sync::Mutex<()>,
    /// Cancellation handle for the currently scheduled debounced refresh.
    debounce: Mutex<Option<CancellationToken>>,
}

/// Process-wide session state, initialized once per application session.
///
/// Cheap to clone; all clones share one state. Only this type writes the
/// `userdata` snapshot, everything else reads it through [`Self::userdata`].
#[derive(Clone)]
pub struct SessionSynchronizer {
    inner: Arc<Inner>,
}

impl SessionSynchronizer {
    /// Build the session and reconcile it before returning.
    ///
    /// If the persisted API-variant marker disagrees with the active
    /// variant, the stored token was issued by a different backend and is
    /// discarded before anything trusts it. The startup refresh runs to
    /// completion: a rejected token comes back as a logged-out session,
    /// never as a constructor error.
    pub async fn connect(
        api: Arc<dyn CtbWebApi>,
        jar: Arc<CookieJar>,
    ) -> Result<Self, StoreError> {
        let configured = api.api_type();
        match jar.api_type_marker() {
            Some(stored) if stored == configured => {}
            Some(stored) => {
                warn!(%stored, %configured, "api variant changed, discarding stored token");
                jar.set_token(None)?;
                jar.set_api_type_marker(configured)?;
            }
            None => jar.set_api_type_marker(configured)?,
        }

        let session = Self {
            inner: Arc::new(Inner {
                api,
                jar,
                userdata: ArcSwapOption::empty(),
                state: ArcSwap::from_pointee(SessionState::Pending),
                refresh_lock: tokio::sync::Mutex::new(()),
                debounce: Mutex::new(None),
            }),
        };

        match session.refresh().await {
            Ok(()) => {}
            Err(ApiError::InvalidToken) => {
                info!("stored token rejected at startup, starting logged out");
            }
            Err(err) => {
                warn!(%err, "startup reconciliation failed, session unverified");
            }
        }

        Ok(session)
    }

    /// The cached user snapshot. `None` until a refresh confirms a token.
    pub fn userdata(&self) -> Option<Arc<UserData>> {
        self.inner.userdata.load_full()
    }

    pub fn state(&self) -> SessionState {
        **self.inner.state.load()
    }

    fn set_state(&self, state: SessionState) {
        debug!(?state, "session transition");
        self.inner.state.store(Arc::new(state));
    }

    /// Reconcile the snapshot with the stored token.
    ///
    /// No token: the session is anonymous and no request is made. With a
    /// token, the backend decides: a confirmed user authenticates the
    /// session; an explicit rejection clears the snapshot and is reported
    /// as [`ApiError::InvalidToken`] rather than silently swallowed.
    /// Transport failures propagate and leave the previous snapshot alone.
    pub async fn refresh(&self) -> ApiResult<()> {
        let _guard = self.inner.refresh_lock.lock().await;

        if self.inner.jar.token().is_none() {
            self.inner.userdata.store(None);
            self.set_state(SessionState::Anonymous);
            debug!("no stored token, session is anonymous");
            return Ok(());
        }

        match self.inner.api.get_me().await? {
            Some(user) => {
                info!(username = %user.username, "session authenticated");
                self.inner.userdata.store(Some(Arc::new(user)));
                self.set_state(SessionState::Authenticated);
                Ok(())
            }
            None => {
                self.inner.userdata.store(None);
                self.set_state(SessionState::Invalid);
                Err(ApiError::InvalidToken)
            }
        }
    }

    /// Persist a freshly issued token and schedule the reconciling refresh.
    ///
    /// The write is durable immediately; the refresh runs after a short
    /// quiet period so back-to-back token changes collapse into a single
    /// reconciliation with the last write winning.
    pub fn sync_token(&self, token: &str) -> Result<(), StoreError> {
        self.inner.jar.set_token(Some(token))?;
        self.set_state(SessionState::Pending);
        self.schedule_refresh();
        Ok(())
    }

    /// Clear the persisted token and schedule the reconciling refresh.
    pub fn unsync_token(&self) -> Result<(), StoreError> {
        self.inner.jar.set_token(None)?;
        self.set_state(SessionState::Pending);
        self.schedule_refresh();
        Ok(())
    }

    fn schedule_refresh(&self) {
        let cancel = CancellationToken::new();
        let superseded = self
            .inner
            .debounce
            .lock()
            .expect("debounce lock")
            .replace(cancel.clone());
        if let Some(previous) = superseded {
            previous.cancel();
        }

        let session = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("debounced refresh superseded");
                }
                () = tokio::time::sleep(Duration::from_millis(SessionConfig::REFRESH_DEBOUNCE_MS)) => {
                    // A failure here must never take the process down; the
                    // session just surfaces as logged out.
                    match session.refresh().await {
                        Ok(()) => {}
                        Err(ApiError::InvalidToken) => {
                            warn!("stored token rejected by backend, logged out");
                        }
                        Err(err) => {
                            warn!(%err, "deferred session refresh failed");
                        }
                    }
                }
            }
        });
    }
}
