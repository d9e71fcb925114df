//! Session-gated hash router.
//!
//! `Router::decide` is the pure part: (navigation address, session presence) → `Decision`.
//! Applying a decision (hiding/showing views, following redirects, calling render hooks)
//! is done by the `Portal`, which owns the mutable view state.

mod route;
mod registry;
mod views;
mod nav;
mod address;
mod scheduler;

pub use route::{Route, RequestedRoute, parse_address};
pub use registry::{AccessClass, ViewEntry, ViewRegistry};
pub use views::{ViewSet, ViewState, ViewStatus};
pub use nav::{NavProjection, RoleBadge};
pub use address::{NavigationAddress, HashAddress};
pub use scheduler::Scheduler;

use tracing::debug;

use crate::config::PortalConfig;

/// Why a request was sent elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Address names no registered view (or has no route segment).
    UnknownRoute,
    /// Protected view requested without a session.
    Unauthenticated,
}

/// Outcome of one routing evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render(Route),
    Redirect { target: Route, reason: RedirectReason },
}

/// Guard table plus the two fixed redirect targets.
#[derive(Debug, Clone)]
pub struct Router {
    registry: ViewRegistry,
    default_route: Route,
    login_route: Route,
    max_redirects: u32,
}

impl Router {
    pub fn new(registry: ViewRegistry, cfg: &PortalConfig) -> Self {
        Self {
            registry,
            default_route: cfg.default_route,
            login_route: cfg.login_route,
            max_redirects: cfg.max_redirects.max(1),
        }
    }

    pub fn registry(&self) -> &ViewRegistry { &self.registry }
    pub fn default_route(&self) -> Route { self.default_route }
    pub fn login_route(&self) -> Route { self.login_route }
    pub fn max_redirects(&self) -> u32 { self.max_redirects }

    /// Decide what to do with `address` given whether a session exists.
    ///
    /// Session presence is the only runtime input; access classes come from the registry.
    pub fn decide(&self, address: Option<&str>, has_session: bool) -> Decision {
        let entry = match parse_address(address) {
            RequestedRoute::Default => self.registry.get(self.default_route),
            RequestedRoute::Name(name) => self.registry.lookup(name),
            RequestedRoute::Malformed => None,
        };
        let decision = match entry {
            None => Decision::Redirect { target: self.default_route, reason: RedirectReason::UnknownRoute },
            Some(e) if e.is_protected() && !has_session => {
                Decision::Redirect { target: self.login_route, reason: RedirectReason::Unauthenticated }
            }
            Some(e) => Decision::Render(e.route),
        };
        debug!(target: "rsms::router", "decide address={:?} session={} -> {:?}", address, has_session, decision);
        decision
    }
}
