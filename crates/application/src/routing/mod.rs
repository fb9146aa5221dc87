//! Navigation: the auth guard and lazy entity routes.

mod navigator;
pub(crate) mod resolver;

pub use navigator::{LOGIN_REDIRECT, Navigator};
pub use resolver::{EntityRouteResolver, RouteResolution};
