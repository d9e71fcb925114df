#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rsms::config::PortalConfig;
use rsms::content::{FormKind, RenderHook, ViewContent};
use rsms::identity::{Role, Session};
use rsms::portal::{LoginForm, SignupForm};
use rsms::Portal;

pub fn config() -> PortalConfig {
    PortalConfig { rng_seed: Some(7), ..PortalConfig::default() }
}

pub fn loaded_portal() -> Portal {
    rsms::telemetry::init();
    let mut p = Portal::new(config()).expect("portal");
    p.load();
    p
}

pub fn signup(p: &mut Portal, name: &str, email: &str, password: &str, role: Role) {
    p.select_role(FormKind::Signup, role);
    let form = SignupForm {
        name: name.into(),
        email: email.into(),
        password: password.into(),
        confirm_password: password.into(),
    };
    p.submit_signup(&form).expect("signup");
}

pub fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm { email: email.into(), password: password.into() }
}

/// Render hook that records the role it was called with.
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<Option<Role>>>>);

impl Recorder {
    pub fn calls(&self) -> Vec<Option<Role>> { self.0.borrow().clone() }
}

impl RenderHook for Recorder {
    fn render(&mut self, session: Option<&Session>) -> ViewContent {
        self.0.borrow_mut().push(session.map(|s| s.identity.role));
        ViewContent::Static
    }
}
