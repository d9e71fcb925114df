use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Every route the portal knows. Anything else in the address is the "unknown" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
    Sensors,
    History,
}

impl Route {
    pub const ALL: [Route; 6] = [Route::Home, Route::Login, Route::Signup, Route::Dashboard, Route::Sensors, Route::History];

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Login => "login",
            Route::Signup => "signup",
            Route::Dashboard => "dashboard",
            Route::Sensors => "sensors",
            Route::History => "history",
        }
    }

    /// Exact, case-sensitive name match.
    pub fn from_name(name: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Navigation address for this route, e.g. `#/dashboard`.
    pub fn address(&self) -> String {
        format!("#/{}", self.as_str())
    }

    /// DOM-style id of the page section bound to this route.
    pub fn view_id(&self) -> String {
        format!("{}-page", self.as_str())
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a navigation address asks for, before registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedRoute<'a> {
    /// No address at all; same as the default route's address.
    Default,
    /// The route segment of the address, not yet validated.
    Name(&'a str),
    /// An address without a route segment (`#home`, `#`).
    Malformed,
}

/// Split a `#/<route>[/...]` address. Only the segment after the first `/` counts.
pub fn parse_address(address: Option<&str>) -> RequestedRoute<'_> {
    let Some(addr) = address.filter(|a| !a.is_empty()) else {
        return RequestedRoute::Default;
    };
    match addr.split('/').nth(1) {
        Some(seg) => RequestedRoute::Name(seg),
        None => RequestedRoute::Malformed,
    }
}
