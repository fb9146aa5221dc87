//! Authentication for the storefront.
//!
//! This module provides:
//! - A persisted session flag with expiry
//! - The current-user state machine and its observers
//! - ERP login, logout, registration and silent re-authentication

mod coordinator;
mod service;
pub(crate) mod session;

pub use coordinator::{AuthCoordinator, AuthState, UserLoadedListener, UserUnloadedListener};
pub use service::{AuthService, LOGIN_PATH, LOGOUT_PATH, ME_PATH, REGISTER_PATH};
pub use session::{SESSION_KEY, SESSION_TTL_DAYS, SessionStore};
