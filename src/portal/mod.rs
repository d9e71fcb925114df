//!
//! rsms portal
//! -----------
//! Single-tab application state: one navigation address, one session, one set of views.
//!
//! Every entry point (load, address change, back/forward, form submits, logout, timers)
//! ends in `reroute`, which evaluates the router against the current address and session,
//! follows redirects up to the configured cap, shows exactly one view, calls its render
//! hook and recomputes the nav projection.

mod auth;
mod tasks;

pub use auth::{LoginForm, SignupForm, LOGIN_SUCCESS, LOGOUT_NOTICE, SIGNUP_SUCCESS};

use std::collections::HashMap;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::config::PortalConfig;
use crate::content::{
    AuthFormHook, DashboardHook, FormKind, FormMessage, HistoryHook, HistoryLog, RenderHook, RoleSelection,
    SensorBoard, SensorSimulator, SensorsHook, SharedHistory, SharedRoleSelection, SharedSensors, ViewContent,
};
use crate::identity::{CredentialStore, LocalCredentialStore, Session, SessionStore};
use crate::router::{
    Decision, HashAddress, NavProjection, NavigationAddress, Route, Router, Scheduler, ViewRegistry, ViewSet,
    ViewStatus,
};

use tasks::Task;

pub struct Portal<A: NavigationAddress = HashAddress> {
    config: PortalConfig,
    router: Router,
    sessions: SessionStore,
    credentials: Box<dyn CredentialStore>,
    address: A,
    views: ViewSet,
    hooks: HashMap<Route, Box<dyn RenderHook>>,
    scheduler: Scheduler<Task>,
    nav: NavProjection,
    roles: SharedRoleSelection,
    messages: HashMap<FormKind, FormMessage>,
    notices: Vec<String>,
    sensors: SharedSensors,
    history: SharedHistory,
}

fn make_rng(seed: Option<u64>, salt: u64) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(salt)),
        None => StdRng::from_entropy(),
    }
}

impl Portal<HashAddress> {
    /// Portal with the standard view table, an empty address and the configured credential store.
    pub fn new(config: PortalConfig) -> Result<Self> {
        let credentials: Box<dyn CredentialStore> = match &config.users_file {
            Some(path) => Box::new(LocalCredentialStore::open(path)?),
            None => Box::new(LocalCredentialStore::in_memory()),
        };
        Ok(Self::with_parts(config, ViewRegistry::standard(), credentials, HashAddress::new()))
    }

    /// Browser back button.
    pub fn back(&mut self) {
        if self.address.back() {
            self.on_address_change();
        }
    }

    /// Browser forward button.
    pub fn forward(&mut self) {
        if self.address.forward() {
            self.on_address_change();
        }
    }
}

impl<A: NavigationAddress> Portal<A> {
    pub fn with_parts(
        config: PortalConfig,
        registry: ViewRegistry,
        credentials: Box<dyn CredentialStore>,
        address: A,
    ) -> Self {
        let history = HistoryLog::shared(config.history_capacity);
        let sensors = SensorBoard::shared(SensorSimulator::new(make_rng(config.rng_seed, 1)), history.clone());
        let roles = RoleSelection::shared();

        let mut hooks: HashMap<Route, Box<dyn RenderHook>> = HashMap::new();
        for entry in registry.routes().filter_map(|r| registry.get(r)).filter(|e| e.has_hook) {
            let hook: Option<Box<dyn RenderHook>> = match entry.route {
                Route::Login => Some(Box::new(AuthFormHook::new(FormKind::Login, roles.clone()))),
                Route::Signup => Some(Box::new(AuthFormHook::new(FormKind::Signup, roles.clone()))),
                Route::Dashboard => Some(Box::new(DashboardHook::new(make_rng(config.rng_seed, 2)))),
                Route::Sensors => Some(Box::new(SensorsHook::new(sensors.clone()))),
                Route::History => Some(Box::new(HistoryHook::new(history.clone()))),
                Route::Home => None,
            };
            if let Some(h) = hook {
                hooks.insert(entry.route, h);
            }
        }

        let views = ViewSet::new(registry.routes());
        let router = Router::new(registry, &config);
        Self {
            config,
            router,
            sessions: SessionStore::new(),
            credentials,
            address,
            views,
            hooks,
            scheduler: Scheduler::new(),
            nav: NavProjection::project(None),
            roles,
            messages: HashMap::new(),
            notices: Vec::new(),
            sensors,
            history,
        }
    }

    /// Replace (or add) the render hook of `route`.
    pub fn with_hook(mut self, route: Route, hook: Box<dyn RenderHook>) -> Self {
        self.hooks.insert(route, hook);
        self
    }

    /// Page load: default the address, take the first sensor readings, route once.
    pub fn load(&mut self) {
        if self.address.get().map_or(true, |a| a.is_empty()) {
            self.address.set(&self.router.default_route().address());
        }
        self.address.take_change();
        let snap = self.sensors.lock().refresh(false);
        self.views.set_content(Route::Sensors, ViewContent::Sensors(snap));
        info!(target: "rsms::portal", "load address={:?}", self.address.get());
        self.reroute();
    }

    /// Set the navigation address; a change re-evaluates the router.
    pub fn navigate(&mut self, address: &str) {
        if self.address.set(address) {
            self.on_address_change();
        }
    }

    pub fn navigate_to(&mut self, route: Route) {
        self.navigate(&route.address());
    }

    /// Navigation-change event handler.
    pub fn on_address_change(&mut self) {
        if self.address.take_change() {
            self.reroute();
        }
    }

    /// Evaluate the current address until a view is shown or the redirect cap is hit.
    pub fn reroute(&mut self) {
        let mut redirects = 0u32;
        loop {
            let session = self.sessions.get();
            let addr = self.address.get();
            self.views.hide_all();
            let decision = self.router.decide(addr.as_deref(), session.is_some());
            self.nav = NavProjection::project(session.as_ref());
            match decision {
                Decision::Render(route) => {
                    self.render(route, session.as_ref());
                    break;
                }
                Decision::Redirect { target, reason } => {
                    if redirects >= self.router.max_redirects() {
                        warn!(
                            target: "rsms::router",
                            "redirect chain cap {} reached at address={:?} (next target {}); falling back",
                            self.router.max_redirects(), addr, target
                        );
                        self.fallback(session.as_ref());
                        break;
                    }
                    redirects += 1;
                    debug!(target: "rsms::router", "redirect {:?} -> {} ({:?})", addr, target, reason);
                    // An unchanged address raises no event; re-evaluate directly either way.
                    self.address.set(&target.address());
                    self.address.take_change();
                }
            }
        }
    }

    fn fallback(&mut self, session: Option<&Session>) {
        let default = self.router.default_route();
        let renderable = match self.router.registry().get(default) {
            Some(e) => !e.is_protected() || session.is_some(),
            None => false,
        };
        if renderable {
            self.address.set(&default.address());
            self.address.take_change();
            self.render(default, session);
        } else {
            error!(target: "rsms::router", "default route {} is not renderable; no view shown", default);
        }
    }

    fn render(&mut self, route: Route, session: Option<&Session>) {
        let Some(generation) = self.views.show(route) else { return; };
        self.scheduler.schedule(self.config.transition_delay_ms, Task::Activate { route, generation });
        if let Some(hook) = self.hooks.get_mut(&route) {
            let content = hook.render(session);
            self.views.set_content(route, content);
        }
        debug!(target: "rsms::router", "rendered {} gen={}", route, generation);
    }

    /// Advance the virtual clock, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(task) = self.scheduler.next_due(until) {
            self.run_task(task);
        }
        self.scheduler.finish(until);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Activate { route, generation } => {
                self.views.activate(route, generation);
            }
            Task::Navigate(route) => self.navigate_to(route),
            Task::Reroute => self.reroute(),
        }
    }

    /// Manual refresh trigger: new readings, logged to history.
    pub fn refresh_sensors(&mut self) {
        let snap = self.sensors.lock().refresh(true);
        self.views.set_content(Route::Sensors, ViewContent::Sensors(snap));
        let rows = self.history.lock().rows();
        self.views.set_content(Route::History, ViewContent::History(rows));
    }

    pub fn select_role(&mut self, form: FormKind, role: crate::identity::Role) {
        self.roles.lock().select(form, role);
    }

    pub fn selected_role(&self, form: FormKind) -> Option<crate::identity::Role> {
        self.roles.lock().selected(form)
    }

    pub fn config(&self) -> &PortalConfig { &self.config }
    pub fn router(&self) -> &Router { &self.router }
    pub fn sessions(&self) -> &SessionStore { &self.sessions }
    pub fn session(&self) -> Option<Session> { self.sessions.get() }
    pub fn address(&self) -> Option<String> { self.address.get() }
    pub fn nav(&self) -> &NavProjection { &self.nav }
    pub fn views(&self) -> &ViewSet { &self.views }
    pub fn current_view(&self) -> Option<Route> { self.views.current() }
    pub fn content(&self, route: Route) -> Option<&ViewContent> { self.views.content(route) }
    pub fn history(&self) -> SharedHistory { self.history.clone() }
    pub fn now_ms(&self) -> u64 { self.scheduler.now_ms() }
    pub fn pending_tasks(&self) -> usize { self.scheduler.pending() }

    /// Status of the view registered under `name`; `Unknown` if there is none.
    pub fn view_status(&self, name: &str) -> ViewStatus {
        match self.router.registry().lookup(name) {
            Some(e) => self.views.status(e.route),
            None => ViewStatus::Unknown,
        }
    }

    pub fn message(&self, form: FormKind) -> Option<&FormMessage> { self.messages.get(&form) }

    /// User notices (the logout confirmation), oldest first.
    pub fn notices(&self) -> &[String] { &self.notices }

    pub fn take_notices(&mut self) -> Vec<String> { std::mem::take(&mut self.notices) }
}
