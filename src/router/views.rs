use std::collections::BTreeMap;

use tracing::trace;

use crate::content::ViewContent;

use super::Route;

/// Presentation state of one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub visible: bool,
    /// Second phase of the show: set one tick after `visible` to run the fade-in.
    pub active: bool,
    pub content: ViewContent,
}

/// Externally observable status of a route's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Unknown,
    Hidden,
    Visible,
    Active,
}

/// All views of the page. At most one is visible; zero only while a redirect is in flight.
#[derive(Debug, Clone, Default)]
pub struct ViewSet {
    views: BTreeMap<Route, ViewState>,
    current: Option<Route>,
    generation: u64,
}

impl ViewSet {
    pub fn new<I: IntoIterator<Item = Route>>(routes: I) -> Self {
        Self {
            views: routes.into_iter().map(|r| (r, ViewState::default())).collect(),
            current: None,
            generation: 0,
        }
    }

    pub fn hide_all(&mut self) {
        for v in self.views.values_mut() {
            v.visible = false;
            v.active = false;
        }
        self.current = None;
    }

    /// Hide everything, then mark `route` visible (not yet active).
    /// Returns the show generation the deferred activation must present.
    pub fn show(&mut self, route: Route) -> Option<u64> {
        if !self.views.contains_key(&route) { return None; }
        self.hide_all();
        self.generation += 1;
        let v = self.views.get_mut(&route)?;
        v.visible = true;
        self.current = Some(route);
        trace!(target: "rsms::router", "show {} gen={}", route, self.generation);
        Some(self.generation)
    }

    /// Apply the active flag if `route` is still the one shown by `generation`.
    /// A superseded activation is dropped and returns false.
    pub fn activate(&mut self, route: Route, generation: u64) -> bool {
        if self.current != Some(route) || self.generation != generation {
            trace!(target: "rsms::router", "activation of {} gen={} superseded", route, generation);
            return false;
        }
        match self.views.get_mut(&route) {
            Some(v) if v.visible => {
                v.active = true;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<Route> { self.current }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn status(&self, route: Route) -> ViewStatus {
        match self.views.get(&route) {
            None => ViewStatus::Unknown,
            Some(v) if v.active => ViewStatus::Active,
            Some(v) if v.visible => ViewStatus::Visible,
            Some(_) => ViewStatus::Hidden,
        }
    }

    pub fn visible_routes(&self) -> Vec<Route> {
        self.views.iter().filter(|(_, v)| v.visible).map(|(r, _)| *r).collect()
    }

    pub fn active_routes(&self) -> Vec<Route> {
        self.views.iter().filter(|(_, v)| v.active).map(|(r, _)| *r).collect()
    }

    pub fn state(&self, route: Route) -> Option<&ViewState> { self.views.get(&route) }

    pub fn content(&self, route: Route) -> Option<&ViewContent> {
        self.views.get(&route).map(|v| &v.content)
    }

    pub fn set_content(&mut self, route: Route, content: ViewContent) {
        if let Some(v) = self.views.get_mut(&route) {
            v.content = content;
        }
    }
}
