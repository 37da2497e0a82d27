//! Session state store
//!
//! Each signed-in user gets one [`SessionStore`], a single-writer snapshot
//! published through a watch channel. Guards subscribe and re-evaluate on
//! every published change; there is no per-field mutation, a snapshot is
//! replaced whole or not at all.

use crate::access::Role;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

/// Identity attached to a verified session token
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuthUser {
    /// Stable user ID from the auth backend
    pub id: Uuid,
    /// Email address, when known
    pub email: Option<String>,
}

/// One consistent view of a session
///
/// While `loading` is true the `role` field means nothing yet and must not
/// be evaluated. The `epoch` counts state transitions so that a role
/// resolution started against an older snapshot can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    /// Whether the role for this session is still being resolved
    pub loading: bool,
    /// The signed-in user, if any
    pub user: Option<AuthUser>,
    /// The resolved role; absent while loading and for profiles without one
    pub role: Option<Role>,
    /// Generation counter, bumped on every transition that starts new work
    pub epoch: u64,
}

impl AuthSnapshot {
    /// The state before anything is known about the session
    pub fn initial() -> Self {
        Self {
            loading: true,
            user: None,
            role: None,
            epoch: 0,
        }
    }
}

/// Single-writer session state with watch-based change notification
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<AuthSnapshot>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store in the initial loading state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::initial());
        Self { tx }
    }

    /// Clone the current snapshot
    pub fn snapshot(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// Record that a user signed in and role resolution is starting
    ///
    /// Returns the epoch the caller must present to [`Self::role_resolved`],
    /// or `None` when the same user is already settled or already resolving
    /// and no new resolution should start.
    pub fn begin_resolution(&self, user: AuthUser) -> Option<u64> {
        let mut started = None;
        self.tx.send_if_modified(|snapshot| {
            if let Some(current) = &snapshot.user {
                if current.id == user.id {
                    return false;
                }
            }
            snapshot.loading = true;
            snapshot.user = Some(user.clone());
            snapshot.role = None;
            snapshot.epoch += 1;
            started = Some(snapshot.epoch);
            true
        });
        started
    }

    /// Apply the result of a role resolution started at `epoch`
    ///
    /// Returns false when the store has moved on since the resolution began,
    /// in which case the result is discarded.
    pub fn role_resolved(&self, epoch: u64, role: Option<Role>) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|snapshot| {
            if snapshot.epoch != epoch {
                debug!(
                    expected = epoch,
                    current = snapshot.epoch,
                    "Discarding stale role resolution"
                );
                return false;
            }
            snapshot.loading = false;
            snapshot.role = role;
            applied = true;
            true
        });
        applied
    }

    /// Re-enter the loading state for a deliberate re-resolution
    ///
    /// The previous role is kept visible while the refresh is in flight, so
    /// guards keep their current verdict instead of flashing a loading view.
    pub fn begin_refresh(&self, user: AuthUser) -> u64 {
        let mut epoch = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.loading = true;
            snapshot.user = Some(user.clone());
            snapshot.epoch += 1;
            epoch = snapshot.epoch;
        });
        epoch
    }

    /// Apply a role change pushed from outside the resolution flow
    ///
    /// Bumps the epoch so that any in-flight resolution is superseded.
    /// Returns false when nobody is signed in.
    pub fn role_changed(&self, role: Option<Role>) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|snapshot| {
            if snapshot.user.is_none() {
                return false;
            }
            snapshot.loading = false;
            snapshot.role = role;
            snapshot.epoch += 1;
            applied = true;
            true
        });
        applied
    }

    /// Clear the session
    pub fn signed_out(&self) {
        self.tx.send_modify(|snapshot| {
            snapshot.loading = false;
            snapshot.user = None;
            snapshot.role = None;
            snapshot.epoch += 1;
        });
    }

    /// Wait until the store leaves the loading state, then return the snapshot
    pub async fn settled(&self) -> AuthSnapshot {
        let mut rx = self.subscribe();
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if !snapshot.loading {
                    return snapshot.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.tx.borrow().clone();
            }
        }
    }
}
