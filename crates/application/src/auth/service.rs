//! ERP authentication flows.

use std::sync::Arc;

use serde_json::{Value, json};
use storefront_domain::{AuthOutcome, User};
use tracing::{debug, warn};

use super::AuthCoordinator;
use crate::ApplicationResult;
use crate::ports::ErpTransport;

/// ERP path for account creation.
pub const REGISTER_PATH: &str = "auth/register";
/// ERP path for login.
pub const LOGIN_PATH: &str = "auth/login";
/// ERP path for logout.
pub const LOGOUT_PATH: &str = "auth/logout";
/// ERP path returning the signed-in user.
pub const ME_PATH: &str = "auth/me";

/// Talks to the ERP and turns its answers into auth transitions.
///
/// Nothing here retries. Callers wrap calls in their own timeout or retry
/// policy.
pub struct AuthService {
    erp: Arc<dyn ErpTransport>,
    coordinator: Arc<AuthCoordinator>,
}

impl AuthService {
    /// Creates the service.
    #[must_use]
    pub fn new(erp: Arc<dyn ErpTransport>, coordinator: Arc<AuthCoordinator>) -> Self {
        Self { erp, coordinator }
    }

    /// The coordinator transitions are applied to.
    #[must_use]
    pub const fn coordinator(&self) -> &Arc<AuthCoordinator> {
        &self.coordinator
    }

    /// Creates an account.
    ///
    /// Blank fields skip the request and report failure.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the request fails. An ERP refusal is
    /// an unsuccessful [`AuthOutcome`], not an error.
    pub async fn register_user(
        &self,
        name: &str,
        password: &str,
        login: &str,
    ) -> ApplicationResult<AuthOutcome> {
        if name.is_empty() || password.is_empty() || login.is_empty() {
            debug!("registration skipped: missing fields");
            return Ok(AuthOutcome::failed());
        }
        let response = self
            .erp
            .post(
                REGISTER_PATH,
                &json!({ "name": name, "login": login, "password": password }),
            )
            .await?;
        Ok(AuthOutcome::from_response(response))
    }

    /// Signs in. A successful answer carrying user data loads that user.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the request fails, or a domain error
    /// if the user data is malformed.
    pub async fn login(&self, login: &str, password: &str) -> ApplicationResult<AuthOutcome> {
        let response = self
            .erp
            .post(LOGIN_PATH, &json!({ "login": login, "password": password }))
            .await?;
        let outcome = AuthOutcome::from_response(response);
        if outcome.success {
            if let Some(data) = user_payload(&Value::Object(outcome.data.clone())) {
                self.coordinator.set_user(Some(data))?;
            }
        } else {
            debug!(login, "login refused");
        }
        Ok(outcome)
    }

    /// Signs out. The local user is unloaded even if the ERP call fails.
    ///
    /// # Errors
    ///
    /// Returns the transport error after unloading the user.
    pub async fn logout(&self) -> ApplicationResult<()> {
        let result = self.erp.post(LOGOUT_PATH, &json!({})).await;
        self.coordinator.set_user(None)?;
        result?;
        Ok(())
    }

    /// Re-authenticates silently on startup.
    ///
    /// Without a live session flag nothing is sent. Otherwise the ERP is
    /// asked for the current user: data loads it, an empty answer unloads.
    /// A transport failure leaves the state alone.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or a domain error for malformed user
    /// data.
    pub async fn restore_session(&self) -> ApplicationResult<Option<Arc<User>>> {
        if !self.coordinator.session() {
            debug!("no session to restore");
            return Ok(None);
        }
        let response = match self.erp.get(ME_PATH).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "session restore failed");
                return Err(err.into());
            }
        };
        self.coordinator.set_user(user_payload(&response))?;
        Ok(self.coordinator.current_user())
    }
}

/// Picks the user object out of an ERP answer: the `user` member when the
/// answer has one, the answer itself otherwise. A `user` member that is not
/// an object, `success: false` and empty answers carry no user.
fn user_payload(response: &Value) -> Option<Value> {
    if let Some(user) = response.get("user") {
        return user.is_object().then(|| user.clone());
    }
    if response.get("success").and_then(Value::as_bool) == Some(false) {
        return None;
    }
    let mut data = response.as_object()?.clone();
    data.remove("success");
    if data.is_empty() {
        None
    } else {
        Some(Value::Object(data))
    }
}
