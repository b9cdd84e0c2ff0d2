//! Auth form state machine.

use super::AuthMode;
use crate::api::{ApiResponse, GophermartApi};
use crate::router::HOME_PATH;
use crate::session::{Credential, SessionStore};
use crate::state::TextInput;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Shown when submitting with a missing login or password.
pub const REQUIRED_FIELDS_MESSAGE: &str = "both fields required";

/// Form lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Error(String),
    Success,
}

/// Focusable inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Login,
    Password,
}

/// Credentials captured when a submit passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub login: String,
    pub password: String,
}

/// A login or register form. Each page gets its own instance.
#[derive(Debug)]
pub struct AuthForm {
    mode: AuthMode,
    pub login: TextInput,
    pub password: TextInput,
    focus: AuthField,
    state: FormState,
    error_since: Option<Instant>,
    error_ttl: Duration,
}

impl AuthForm {
    pub fn new(mode: AuthMode, error_ttl: Duration) -> Self {
        Self {
            mode,
            login: TextInput::new(),
            password: TextInput::new(),
            focus: AuthField::default(),
            state: FormState::Idle,
            error_since: None,
            error_ttl,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn focus(&self) -> AuthField {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Error text currently on display.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            AuthField::Login => AuthField::Password,
            AuthField::Password => AuthField::Login,
        };
    }

    /// The input that has focus.
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            AuthField::Login => &mut self.login,
            AuthField::Password => &mut self.password,
        }
    }

    /// Validate and enter `Submitting`.
    ///
    /// Returns the request to send, or `None` when validation failed or a
    /// submit is already in flight.
    pub fn begin_submit(&mut self, now: Instant) -> Option<AuthRequest> {
        if self.is_submitting() {
            debug!(mode = ?self.mode, "Submit ignored while in flight");
            return None;
        }
        if self.login.value().is_empty() || self.password.value().is_empty() {
            self.fail(REQUIRED_FIELDS_MESSAGE, now);
            return None;
        }

        self.state = FormState::Submitting;
        self.error_since = None;
        Some(AuthRequest {
            mode: self.mode,
            login: self.login.value().to_string(),
            password: self.password.value().to_string(),
        })
    }

    /// Apply the server's answer to a submit.
    ///
    /// On success the session is established and the navigation target is
    /// returned.
    pub fn complete(
        &mut self,
        login: &str,
        response: ApiResponse<Credential>,
        sessions: &mut SessionStore,
        now: Instant,
    ) -> Option<&'static str> {
        if !self.is_submitting() {
            return None;
        }
        match response.into_result() {
            Ok(credential) => {
                sessions.establish(login, credential);
                self.state = FormState::Success;
                info!(mode = ?self.mode, user = %login, "Authenticated");
                Some(HOME_PATH)
            }
            Err(message) => {
                self.fail(message, now);
                None
            }
        }
    }

    /// Validate, call the API and apply the result in one go.
    pub async fn submit(
        &mut self,
        api: &GophermartApi,
        sessions: &mut SessionStore,
        now: Instant,
    ) -> Option<&'static str> {
        let request = self.begin_submit(now)?;
        let response = api
            .authenticate(request.mode.endpoint(), &request.login, &request.password)
            .await;
        self.complete(&request.login, response, sessions, now)
    }

    /// Clear an error that has been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if let Some(since) = self.error_since
            && now.duration_since(since) >= self.error_ttl
        {
            self.state = FormState::Idle;
            self.error_since = None;
        }
    }

    fn fail(&mut self, message: impl Into<String>, now: Instant) {
        self.state = FormState::Error(message.into());
        self.error_since = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use crate::api::{HttpResponse, Method};

    const TTL: Duration = Duration::from_secs(3);

    fn filled(mode: AuthMode, login: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new(mode, TTL);
        form.login = TextInput::with_value(login);
        form.password = TextInput::with_value(password);
        form
    }

    #[tokio::test]
    async fn test_empty_password_never_calls_network() {
        let backend = FakeBackend::new();
        let api = GophermartApi::new("http://gophermart.test", backend.clone());
        let mut sessions = SessionStore::new();
        let mut form = filled(AuthMode::Login, "bob", "");

        let target = form.submit(&api, &mut sessions, Instant::now()).await;

        assert_eq!(target, None);
        assert_eq!(backend.request_count(), 0);
        assert_eq!(
            form.state(),
            &FormState::Error(REQUIRED_FIELDS_MESSAGE.to_string())
        );
        assert!(!sessions.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_establishes_session_and_navigates_home() {
        let backend = FakeBackend::new();
        backend.reply(
            Method::Post,
            "/api/user/login",
            HttpResponse::new(200, "").with_header("Authorization", "Bearer abc"),
        );
        let api = GophermartApi::new("http://gophermart.test", backend.clone());
        let mut sessions = SessionStore::new();
        let mut form = filled(AuthMode::Login, "bob", "x");

        let target = form.submit(&api, &mut sessions, Instant::now()).await;

        assert_eq!(target, Some("/"));
        assert_eq!(form.state(), &FormState::Success);
        let session = sessions.lookup("bob").unwrap();
        assert_eq!(session.credential, Credential::new("Bearer abc"));
    }

    #[tokio::test]
    async fn test_register_failure_shows_server_message() {
        let backend = FakeBackend::new();
        backend.respond(Method::Post, "/api/user/register", 409, "login is taken");
        let api = GophermartApi::new("http://gophermart.test", backend.clone());
        let mut sessions = SessionStore::new();
        let mut form = filled(AuthMode::Register, "bob", "x");

        let target = form.submit(&api, &mut sessions, Instant::now()).await;

        assert_eq!(target, None);
        assert_eq!(form.error(), Some("login is taken"));
        assert_eq!(backend.requests_to(Method::Post, "/api/user/register").len(), 1);
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_submit_ignored_while_submitting() {
        let mut form = filled(AuthMode::Login, "bob", "x");
        let now = Instant::now();

        assert!(form.begin_submit(now).is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit(now).is_none());
    }

    #[test]
    fn test_error_clears_after_ttl() {
        let mut form = filled(AuthMode::Login, "", "");
        let start = Instant::now();
        form.begin_submit(start);
        assert!(form.error().is_some());

        form.tick(start + Duration::from_secs(2));
        assert!(form.error().is_some());

        form.tick(start + TTL);
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn test_complete_without_submit_is_ignored() {
        let mut form = filled(AuthMode::Login, "bob", "x");
        let mut sessions = SessionStore::new();

        let target = form.complete(
            "bob",
            ApiResponse::ok(Credential::new("Bearer abc"), ""),
            &mut sessions,
            Instant::now(),
        );

        assert_eq!(target, None);
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = AuthForm::new(AuthMode::Login, TTL);
        form.focused_input().push_char('b');
        form.focus_next();
        assert_eq!(form.focus(), AuthField::Password);
        form.focused_input().push_char('p');
        form.focus_next();
        assert_eq!(form.focus(), AuthField::Login);

        assert_eq!(form.login.value(), "b");
        assert_eq!(form.password.value(), "p");
    }
}
