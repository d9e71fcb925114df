use tracing::info;

use crate::content::{FormKind, FormMessage};
use crate::error::{AppError, AppResult};
use crate::identity::{AuthError, Identity, Registration, Session};
use crate::router::NavigationAddress;

use super::tasks::Task;
use super::Portal;

pub const SIGNUP_SUCCESS: &str = "Registration successful. Please login to continue.";
pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const LOGOUT_NOTICE: &str = "You have been successfully logged out.";

/// Fields of the registration form. The role comes from the form's role buttons.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Fields of the login form. The role comes from the form's role buttons.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl<A: NavigationAddress> Portal<A> {
    fn fail(&mut self, form: FormKind, err: AuthError) -> AppError {
        let err: AppError = err.into();
        self.messages.insert(form, FormMessage::error(err.message()));
        err
    }

    /// Register a new identity. Routing is untouched until the delayed move to home.
    pub fn submit_signup(&mut self, form: &SignupForm) -> AppResult<Identity> {
        self.messages.remove(&FormKind::Signup);
        let Some(role) = self.selected_role(FormKind::Signup) else {
            return Err(self.fail(FormKind::Signup, AuthError::RoleRequired));
        };
        if form.password != form.confirm_password {
            return Err(self.fail(FormKind::Signup, AuthError::PasswordMismatch));
        }
        let req = Registration {
            name: form.name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            role,
        };
        let identity = match self.credentials.register(&req) {
            Ok(id) => id,
            Err(e) => return Err(self.fail(FormKind::Signup, e)),
        };
        self.messages.insert(FormKind::Signup, FormMessage::success(SIGNUP_SUCCESS));
        let home = self.router.default_route();
        self.scheduler.schedule(self.config.signup_redirect_delay_ms, Task::Navigate(home));
        Ok(identity)
    }

    /// Authenticate with the selected role. On success the session is installed, the
    /// current view is re-routed at once and the dashboard follows after a delay.
    pub fn submit_login(&mut self, form: &LoginForm) -> AppResult<Session> {
        self.messages.remove(&FormKind::Login);
        let Some(role) = self.selected_role(FormKind::Login) else {
            return Err(self.fail(FormKind::Login, AuthError::RoleRequired));
        };
        let identity = match self.credentials.authenticate(&form.email, &form.password, role) {
            Ok(id) => id,
            Err(e) => return Err(self.fail(FormKind::Login, e)),
        };
        let session = self.sessions.set(identity);
        self.messages.insert(FormKind::Login, FormMessage::success(LOGIN_SUCCESS));
        self.roles.lock().reset(FormKind::Login);
        self.reroute();

        let delay = self.config.login_redirect_delay_ms;
        self.scheduler.schedule(delay, Task::Navigate(self.config.post_login_route));
        self.scheduler.schedule(delay + self.config.login_reroute_delay_ms, Task::Reroute);
        info!(target: "rsms::portal", "login email={} role={}", session.identity.email, session.identity.role);
        Ok(session)
    }

    /// Clear the session, re-route, confirm to the user, then go home.
    pub fn logout(&mut self) {
        let had_session = self.sessions.clear();
        self.reroute();
        self.notices.push(LOGOUT_NOTICE.to_string());
        info!(target: "rsms::portal", "logout had_session={}", had_session);
        let home = self.router.default_route();
        self.navigate_to(home);
    }
}
