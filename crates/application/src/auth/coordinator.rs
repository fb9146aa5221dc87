//! Current-user state and its observers.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use storefront_domain::{DomainResult, User};
use tokio::sync::watch;
use tracing::{info, warn};

use super::SessionStore;

/// Called with the new user each time a user is loaded.
pub type UserLoadedListener = Arc<dyn Fn(&User) + Send + Sync>;

/// Called each time the user is unloaded.
pub type UserUnloadedListener = Arc<dyn Fn() + Send + Sync>;

/// Whether someone is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Nobody is signed in.
    Anonymous,
    /// This user is signed in.
    Authenticated(Arc<User>),
}

impl AuthState {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&Arc<User>> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Owns the current user and tells listeners when it comes and goes.
///
/// Listeners run synchronously inside [`AuthCoordinator::set_user`], in
/// registration order. The list is copied before the fan-out starts, so a
/// listener registered by another listener first fires on the next
/// transition. A listener that blocks stalls the ones after it.
pub struct AuthCoordinator {
    session: SessionStore,
    state: watch::Sender<AuthState>,
    loaded: RwLock<Vec<UserLoadedListener>>,
    unloaded: RwLock<Vec<UserUnloadedListener>>,
}

impl AuthCoordinator {
    /// Creates an anonymous coordinator.
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        let (state, _) = watch::channel(AuthState::Anonymous);
        Self {
            session,
            state,
            loaded: RwLock::new(Vec::new()),
            unloaded: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the current user.
    ///
    /// `Some(data)` builds a fresh user, persists the session flag and
    /// notifies the loaded listeners. `None` or JSON `null` signs out,
    /// clears the flag and notifies the unloaded listeners. A session flag that cannot be
    /// written is logged; the transition still happens.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not a valid user payload. Nothing
    /// changes in that case.
    pub fn set_user(&self, data: Option<Value>) -> DomainResult<()> {
        match data.filter(|data| !data.is_null()) {
            Some(data) => {
                let user = Arc::new(User::from_value(data)?);
                self.state
                    .send_replace(AuthState::Authenticated(Arc::clone(&user)));
                self.persist_session(true);
                info!(user_id = ?user.id, "user loaded");

                let listeners = self
                    .loaded
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                for listener in listeners {
                    listener(&user);
                }
            }
            None => {
                self.state.send_replace(AuthState::Anonymous);
                self.persist_session(false);
                info!("user unloaded");

                let listeners = self
                    .unloaded
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                for listener in listeners {
                    listener();
                }
            }
        }
        Ok(())
    }

    /// A live view of the auth state. Reading it never blocks.
    #[must_use]
    pub fn user(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// The signed-in user right now.
    #[must_use]
    pub fn current_user(&self) -> Option<Arc<User>> {
        self.state.borrow().user().cloned()
    }

    /// Registers a listener for user loads.
    pub fn on_user_loaded<F>(&self, listener: F)
    where
        F: Fn(&User) + Send + Sync + 'static,
    {
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Registers a listener for user unloads.
    pub fn on_user_unloaded<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.unloaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Whether a live session flag exists.
    #[must_use]
    pub fn session(&self) -> bool {
        self.session.get()
    }

    fn persist_session(&self, authenticated: bool) {
        if let Err(err) = self.session.set(authenticated) {
            warn!(error = %err, authenticated, "session flag not persisted");
        }
    }
}
