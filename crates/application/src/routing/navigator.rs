//! Navigation guard in front of the route table.

use std::sync::Arc;

use storefront_domain::{NavigationOutcome, NavigationTarget};
use tracing::debug;

use super::EntityRouteResolver;
use crate::ApplicationResult;
use crate::auth::AuthCoordinator;
use crate::ports::{CatalogLookup, RouteTable};

/// Where anonymous visitors of protected pages are sent.
pub const LOGIN_REDIRECT: &str = "/";

/// Runs every navigation through the auth guard and the entity resolver.
pub struct Navigator<C, R> {
    auth: Arc<AuthCoordinator>,
    resolver: EntityRouteResolver<C, R>,
}

impl<C: CatalogLookup, R: RouteTable> Navigator<C, R> {
    /// Creates a navigator.
    pub const fn new(auth: Arc<AuthCoordinator>, resolver: EntityRouteResolver<C, R>) -> Self {
        Self { auth, resolver }
    }

    /// Decides where a navigation ends.
    ///
    /// Protected targets need a loaded user. Known paths match directly;
    /// unknown ones go through the entity resolver.
    ///
    /// # Errors
    ///
    /// Returns the catalog error if an unknown path cannot be looked up.
    pub async fn navigate(
        &self,
        target: &NavigationTarget,
    ) -> ApplicationResult<NavigationOutcome> {
        if target.requires_auth {
            if self.auth.current_user().is_none() {
                debug!(path = %target.path, "anonymous visit to protected page");
                return Ok(NavigationOutcome::Redirect(LOGIN_REDIRECT.to_string()));
            }
            let matches = self.resolver.routes().resolve(&target.path);
            return Ok(if matches.is_empty() {
                NavigationOutcome::NotFound
            } else {
                NavigationOutcome::Matched(matches)
            });
        }

        let resolution = self.resolver.resolve(&target.path).await?;
        Ok(resolution
            .matches()
            .map_or(NavigationOutcome::NotFound, |matches| {
                NavigationOutcome::Matched(matches.to_vec())
            }))
    }
}
