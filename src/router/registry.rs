use tracing::debug;

use super::Route;

/// Static access class of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessClass {
    Public,
    Protected,
}

/// One row of the view registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub route: Route,
    pub access: AccessClass,
    /// Whether rendering this view calls a render hook (session-dependent content).
    pub has_hook: bool,
}

impl ViewEntry {
    pub fn public(route: Route, has_hook: bool) -> Self { Self { route, access: AccessClass::Public, has_hook } }
    pub fn protected(route: Route) -> Self { Self { route, access: AccessClass::Protected, has_hook: true } }

    pub fn is_protected(&self) -> bool { self.access == AccessClass::Protected }
}

/// Route name → view entry. Built once; never mutated afterwards.
///
/// Lookup answers only "is this a known view". Whether a known view is currently
/// shown is tracked by the `ViewSet`, so "unknown" and "known but hidden" never blur.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    entries: Vec<ViewEntry>,
}

impl ViewRegistry {
    /// Registry from explicit rows. Later rows for the same route replace earlier ones.
    pub fn from_entries<I: IntoIterator<Item = ViewEntry>>(rows: I) -> Self {
        let mut entries: Vec<ViewEntry> = Vec::new();
        for row in rows {
            entries.retain(|e| e.route != row.route);
            entries.push(row);
        }
        debug!(target: "rsms::router", "view registry built with {} entries", entries.len());
        Self { entries }
    }

    /// The portal's table: dashboard, sensors and history are protected; auth forms re-initialize.
    pub fn standard() -> Self {
        Self::from_entries([
            ViewEntry::public(Route::Home, false),
            ViewEntry::public(Route::Login, true),
            ViewEntry::public(Route::Signup, true),
            ViewEntry::protected(Route::Dashboard),
            ViewEntry::protected(Route::Sensors),
            ViewEntry::protected(Route::History),
        ])
    }

    pub fn lookup(&self, name: &str) -> Option<&ViewEntry> {
        let route = Route::from_name(name)?;
        self.get(route)
    }

    pub fn get(&self, route: Route) -> Option<&ViewEntry> {
        self.entries.iter().find(|e| e.route == route)
    }

    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.entries.iter().map(|e| e.route)
    }

    pub fn protected_routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.entries.iter().filter(|e| e.is_protected()).map(|e| e.route)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Default for ViewRegistry {
    fn default() -> Self { Self::standard() }
}
