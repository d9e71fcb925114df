use std::sync::Arc;

use parking_lot::Mutex;

use crate::identity::{Role, Session};

use super::{RenderHook, ViewContent};

/// Which authentication form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline message under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn success(text: impl Into<String>) -> Self { Self { kind: MessageKind::Success, text: text.into() } }
    pub fn error(text: impl Into<String>) -> Self { Self { kind: MessageKind::Error, text: text.into() } }
    pub fn is_error(&self) -> bool { self.kind == MessageKind::Error }
}

/// Role buttons state of the two auth forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelection {
    login: Option<Role>,
    signup: Option<Role>,
}

pub type SharedRoleSelection = Arc<Mutex<RoleSelection>>;

impl RoleSelection {
    pub fn shared() -> SharedRoleSelection { Arc::new(Mutex::new(Self::default())) }

    pub fn select(&mut self, form: FormKind, role: Role) {
        *self.slot(form) = Some(role);
    }

    pub fn reset(&mut self, form: FormKind) {
        *self.slot(form) = None;
    }

    pub fn selected(&self, form: FormKind) -> Option<Role> {
        match form {
            FormKind::Login => self.login,
            FormKind::Signup => self.signup,
        }
    }

    fn slot(&mut self, form: FormKind) -> &mut Option<Role> {
        match form {
            FormKind::Login => &mut self.login,
            FormKind::Signup => &mut self.signup,
        }
    }
}

/// What an auth form shows after (re)initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormView {
    pub form: FormKind,
    pub role_options: [Role; 2],
    pub selected: Option<Role>,
}

/// Re-initializes the role buttons of an auth form each time it is shown.
pub struct AuthFormHook {
    form: FormKind,
    selection: SharedRoleSelection,
}

impl AuthFormHook {
    pub fn new(form: FormKind, selection: SharedRoleSelection) -> Self { Self { form, selection } }
}

impl RenderHook for AuthFormHook {
    fn render(&mut self, _session: Option<&Session>) -> ViewContent {
        ViewContent::AuthForm(AuthFormView {
            form: self.form,
            role_options: Role::ALL,
            selected: self.selection.lock().selected(self.form),
        })
    }
}
