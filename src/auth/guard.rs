//! Module access guards
//!
//! A guard turns one session snapshot plus one module into a single
//! disposition. The ordering is load-bearing: a role that is absent because
//! it has not loaded yet must not be evaluated, or a signed-in user would
//! flash a denial before their role arrives.

use super::session::{AuthSnapshot, SessionStore};
use crate::access::{Module, Role, can_access};
use tokio::sync::watch;

/// What a guard decided for one module
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDisposition {
    /// The session is still resolving; show nothing yet
    Loading,
    /// Nobody is signed in; send them to sign-in
    SignIn,
    /// Signed in but the role does not grant this module
    Denied {
        /// The module that was requested
        module: Module,
        /// The role that was denied, absent when the profile has none
        role: Option<Role>,
    },
    /// Access granted
    Allowed {
        /// The module that was requested
        module: Module,
        /// The role that granted access
        role: Role,
    },
}

impl GuardDisposition {
    /// Evaluate a snapshot for one module
    pub fn evaluate(snapshot: &AuthSnapshot, module: Module) -> Self {
        if snapshot.loading {
            return Self::Loading;
        }
        if snapshot.user.is_none() {
            return Self::SignIn;
        }
        match snapshot.role {
            Some(role) if can_access(Some(role), module) => Self::Allowed { module, role },
            role => Self::Denied { module, role },
        }
    }

    /// Whether this disposition grants access
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// A guard bound to one module of one session, re-evaluated on every change
///
/// The same guard instance moves between dispositions as the session store
/// publishes new snapshots; callers never rebuild it to pick up a change.
#[derive(Debug)]
pub struct RouteGuard {
    rx: watch::Receiver<AuthSnapshot>,
    module: Module,
}

impl RouteGuard {
    /// Create a guard for `module` watching `store`
    pub fn new(store: &SessionStore, module: Module) -> Self {
        Self {
            rx: store.subscribe(),
            module,
        }
    }

    /// The module this guard protects
    pub fn module(&self) -> Module {
        self.module
    }

    /// Evaluate the current snapshot
    pub fn disposition(&self) -> GuardDisposition {
        GuardDisposition::evaluate(&self.rx.borrow(), self.module)
    }

    /// Wait for the next snapshot change and re-evaluate
    ///
    /// Returns `None` when the session store has been dropped.
    pub async fn changed(&mut self) -> Option<GuardDisposition> {
        self.rx.changed().await.ok()?;
        Some(self.disposition())
    }

    /// Wait until the session settles, then return the disposition
    ///
    /// Never returns [`GuardDisposition::Loading`]. If the store is dropped
    /// while still loading, the guard fails closed with sign-in.
    pub async fn settled(&mut self) -> GuardDisposition {
        loop {
            {
                let snapshot = self.rx.borrow_and_update();
                if !snapshot.loading {
                    return GuardDisposition::evaluate(&snapshot, self.module);
                }
            }
            if self.rx.changed().await.is_err() {
                return GuardDisposition::SignIn;
            }
        }
    }
}
