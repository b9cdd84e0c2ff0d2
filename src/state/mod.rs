//! State management for the Gophermart client.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Network work never
//! happens in the reducer: actions that need it return an [`Effect`] for the
//! event loop to run, and the result comes back as another action.

mod app_state;
mod balance_state;
mod order_state;

pub use app_state::{AppState, InputMode, TextInput};
pub use balance_state::{Balance, Withdrawal, withdrawn_sum};
pub use order_state::{Order, OrderStatus, pending_count};

use crate::api::ApiResponse;
use crate::auth::{AuthForm, AuthMode, AuthRequest};
use crate::dashboard::{Dashboard, FlowOutcome, FlowRequest};
use crate::router::{HOME_PATH, Navigator, Page};
use crate::session::{Credential, SessionStore};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    Navigate(String),
    OpenLocation,
    SubmitLocation,
    CancelLocation,

    // Text editing on whatever has focus
    InputChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    FocusNext,

    // Forms
    Submit,
    AuthCompleted {
        generation: u64,
        login: String,
        response: ApiResponse<Credential>,
    },

    // Dashboard
    ToggleOrderAction,
    RefreshOrders,
    ToggleWithdrawals,
    FlowCompleted {
        generation: u64,
        outcome: FlowOutcome,
    },

    // UI actions
    ScrollUp,
    ScrollDown,
    ToggleHelp,
    DismissAlert,
    Tick,

    Logout,
    Quit,
}

/// Network work requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Authenticate(AuthTicket),
    RunFlow(FlowTicket),
}

/// A login/register call to make on behalf of the page that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTicket {
    pub generation: u64,
    pub request: AuthRequest,
}

/// A dashboard flow to run with the session's credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTicket {
    pub generation: u64,
    pub credential: Credential,
    pub request: FlowRequest,
}

/// A transient message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub raised_at: Instant,
}

impl Alert {
    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            raised_at: now,
        }
    }

    /// Check if the alert has been up for at least `ttl`.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Current location and page.
    pub router: Navigator,
    pub sessions: SessionStore,
    pub login_form: AuthForm,
    pub register_form: AuthForm,
    /// Present while the home page is entered.
    pub dashboard: Option<Dashboard>,
    alert_ttl: Duration,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a store showing `start_path` with nobody logged in.
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        start_path: &str,
        alert_ttl: Duration,
    ) -> Self {
        Self {
            app: AppState::new(),
            router: Navigator::new(start_path, false),
            sessions: SessionStore::new(),
            login_form: AuthForm::new(AuthMode::Login, alert_ttl),
            register_form: AuthForm::new(AuthMode::Register, alert_ttl),
            dashboard: None,
            alert_ttl,
            action_tx,
        }
    }

    /// A sender for tasks that report back with actions.
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn page(&self) -> Page {
        self.router.page()
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        self.reduce_at(action, Instant::now())
    }

    /// Apply an action as of `now`.
    pub fn reduce_at(&mut self, action: Action, now: Instant) -> Option<Effect> {
        match action {
            // Navigation
            Action::Navigate(path) => return self.navigate(&path),
            Action::OpenLocation => {
                self.app.location = TextInput::with_value(self.router.path());
                self.app.input_mode = InputMode::Location;
            }
            Action::SubmitLocation => {
                self.app.input_mode = InputMode::Normal;
                let path = self.app.location.take();
                return self.navigate(path.trim());
            }
            Action::CancelLocation => {
                self.app.input_mode = InputMode::Normal;
                self.app.location.clear();
            }

            Action::InputChar(c) => {
                if let Some(input) = self.focused_input() {
                    input.push_char(c);
                }
            }
            Action::DeleteChar => {
                if let Some(input) = self.focused_input() {
                    input.pop_char();
                }
            }
            Action::CursorLeft => {
                if let Some(input) = self.focused_input() {
                    input.cursor_left();
                }
            }
            Action::CursorRight => {
                if let Some(input) = self.focused_input() {
                    input.cursor_right();
                }
            }
            Action::FocusNext => match self.page() {
                Page::Login => self.login_form.focus_next(),
                Page::Register => self.register_form.focus_next(),
                Page::Home => {
                    if let Some(dashboard) = &mut self.dashboard {
                        dashboard.focus_next();
                    }
                }
                Page::NotFound => {}
            },

            Action::Submit => return self.submit(now),
            Action::AuthCompleted {
                generation,
                login,
                response,
            } => return self.complete_auth(generation, &login, response, now),

            Action::ToggleOrderAction => {
                if let Some(dashboard) = &mut self.dashboard {
                    dashboard.toggle_action();
                }
            }
            Action::RefreshOrders => {
                let request = self.dashboard.as_mut().and_then(Dashboard::refresh)?;
                return self.flow_effect(request);
            }
            Action::ToggleWithdrawals => {
                let request = self.dashboard.as_mut().and_then(Dashboard::toggle_panel)?;
                return self.flow_effect(request);
            }
            Action::FlowCompleted {
                generation,
                outcome,
            } => self.complete_flow(generation, outcome, now),

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::DismissAlert => {
                if let Some(dashboard) = &mut self.dashboard {
                    dashboard.dismiss_alert();
                }
            }
            Action::Tick => {
                self.login_form.tick(now);
                self.register_form.tick(now);
                if let Some(dashboard) = &mut self.dashboard {
                    dashboard.tick(now);
                }
            }

            Action::Logout => return self.logout(),
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
        None
    }

    /// Go to `path`, entering its page if it differs from the current one.
    pub fn navigate(&mut self, path: &str) -> Option<Effect> {
        let authed = self.sessions.is_authenticated();
        let page = self.router.navigate(path, authed)?;
        self.enter(page)
    }

    /// End the session and fall back to the login page.
    pub fn logout(&mut self) -> Option<Effect> {
        self.sessions.end()?;
        let page = self.router.reload(false)?;
        self.enter(page)
    }

    fn enter(&mut self, page: Page) -> Option<Effect> {
        self.dashboard = None;
        match page {
            Page::Login => self.login_form = AuthForm::new(AuthMode::Login, self.alert_ttl),
            Page::Register => {
                self.register_form = AuthForm::new(AuthMode::Register, self.alert_ttl)
            }
            Page::Home => {
                let user_id = self.sessions.active()?.user_id.clone();
                let mut dashboard = Dashboard::new(user_id, self.alert_ttl);
                let request = dashboard.load();
                self.dashboard = Some(dashboard);
                return self.flow_effect(request?);
            }
            Page::NotFound => {}
        }
        None
    }

    fn submit(&mut self, now: Instant) -> Option<Effect> {
        let generation = self.router.generation();
        match self.page() {
            Page::Login => self.login_form.begin_submit(now).map(|request| {
                Effect::Authenticate(AuthTicket {
                    generation,
                    request,
                })
            }),
            Page::Register => self.register_form.begin_submit(now).map(|request| {
                Effect::Authenticate(AuthTicket {
                    generation,
                    request,
                })
            }),
            Page::Home => {
                let request = self.dashboard.as_mut()?.submit(now)?;
                self.flow_effect(request)
            }
            Page::NotFound => self.navigate(HOME_PATH),
        }
    }

    fn complete_auth(
        &mut self,
        generation: u64,
        login: &str,
        response: ApiResponse<Credential>,
        now: Instant,
    ) -> Option<Effect> {
        if generation != self.router.generation() {
            warn!(generation, "Discarding auth result for a page that is gone");
            return None;
        }
        let form = match self.page() {
            Page::Login => &mut self.login_form,
            Page::Register => &mut self.register_form,
            page => {
                debug!(?page, "Auth result outside an auth page");
                return None;
            }
        };
        let target = form.complete(login, response, &mut self.sessions, now)?;
        self.navigate(target)
    }

    fn complete_flow(&mut self, generation: u64, outcome: FlowOutcome, now: Instant) {
        match &mut self.dashboard {
            Some(dashboard) if generation == self.router.generation() => {
                dashboard.complete(outcome, now)
            }
            _ => warn!(generation, "Discarding flow result for a page that is gone"),
        }
    }

    fn flow_effect(&self, request: FlowRequest) -> Option<Effect> {
        let session = self.sessions.active()?;
        Some(Effect::RunFlow(FlowTicket {
            generation: self.router.generation(),
            credential: session.credential.clone(),
            request,
        }))
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        if self.app.is_editing_location() {
            return Some(&mut self.app.location);
        }
        match self.router.page() {
            Page::Login => Some(self.login_form.focused_input()),
            Page::Register => Some(self.register_form.focused_input()),
            Page::Home => self.dashboard.as_mut().map(Dashboard::focused_input),
            Page::NotFound => None,
        }
    }

    fn scroll(&mut self, delta: i32) {
        if let Some(dashboard) = &mut self.dashboard {
            dashboard.scroll(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::OrderAction;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const TTL: Duration = Duration::from_secs(3);

    fn store(path: &str) -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Store::new(tx, path, TTL), rx)
    }

    fn type_text(store: &mut Store, text: &str) {
        for c in text.chars() {
            store.reduce(Action::InputChar(c));
        }
    }

    fn logged_in() -> (Store, FlowTicket) {
        let (mut store, _rx) = store("/");
        type_text(&mut store, "bob");
        store.reduce(Action::FocusNext);
        type_text(&mut store, "x");
        let Some(Effect::Authenticate(ticket)) = store.reduce(Action::Submit) else {
            panic!("expected an auth effect");
        };
        let effect = store.reduce(Action::AuthCompleted {
            generation: ticket.generation,
            login: ticket.request.login,
            response: ApiResponse::ok(Credential::new("Bearer abc"), "ok"),
        });
        let Some(Effect::RunFlow(flow)) = effect else {
            panic!("expected the initial load");
        };
        (store, flow)
    }

    #[test]
    fn test_start_unauthenticated() {
        let (store, _rx) = store("/");
        assert_eq!(store.page(), Page::Login);
        assert_eq!(store.router.path(), "/login");
        assert!(store.dashboard.is_none());
    }

    #[test]
    fn test_login_enters_home_and_loads() {
        let (store, flow) = logged_in();

        assert_eq!(store.page(), Page::Home);
        assert_eq!(store.router.path(), "/");
        assert_eq!(flow.request, FlowRequest::Load);
        assert_eq!(flow.credential, Credential::new("Bearer abc"));
        assert_eq!(store.dashboard.as_ref().unwrap().user_id(), "bob");
    }

    #[test]
    fn test_auth_submit_carries_form_values() {
        let (mut store, _rx) = store("/register");
        type_text(&mut store, "alice");
        store.reduce(Action::FocusNext);
        type_text(&mut store, "pw");

        let effect = store.reduce(Action::Submit);
        let Some(Effect::Authenticate(ticket)) = effect else {
            panic!("expected an auth effect");
        };
        assert_eq!(
            ticket.request,
            AuthRequest {
                mode: AuthMode::Register,
                login: "alice".to_string(),
                password: "pw".to_string(),
            }
        );
        assert!(store.reduce(Action::Submit).is_none());
    }

    #[test]
    fn test_flow_result_applied() {
        let (mut store, flow) = logged_in();
        store.reduce(Action::FlowCompleted {
            generation: flow.generation,
            outcome: FlowOutcome {
                balance: Some(Balance::new(dec!(500), dec!(42))),
                orders: Some(Vec::new()),
                ..FlowOutcome::default()
            },
        });

        let dashboard = store.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.balance(), Some(&Balance::new(dec!(500), dec!(42))));
        assert!(!dashboard.is_in_flight());
    }

    #[test]
    fn test_stale_flow_result_discarded() {
        let (mut store, flow) = logged_in();

        store.reduce(Action::Navigate("/nowhere".to_string()));
        assert_eq!(store.page(), Page::NotFound);
        store.reduce(Action::Submit);
        assert_eq!(store.page(), Page::Home);

        store.reduce(Action::FlowCompleted {
            generation: flow.generation,
            outcome: FlowOutcome {
                balance: Some(Balance::new(dec!(1), dec!(0))),
                ..FlowOutcome::default()
            },
        });
        assert!(store.dashboard.as_ref().unwrap().balance().is_none());
    }

    #[test]
    fn test_stale_auth_result_discarded() {
        let (mut store, _rx) = store("/login");
        type_text(&mut store, "bob");
        store.reduce(Action::FocusNext);
        type_text(&mut store, "x");
        let Some(Effect::Authenticate(ticket)) = store.reduce(Action::Submit) else {
            panic!("expected an auth effect");
        };

        store.reduce(Action::Navigate("/register".to_string()));
        let effect = store.reduce(Action::AuthCompleted {
            generation: ticket.generation,
            login: "bob".to_string(),
            response: ApiResponse::ok(Credential::new("Bearer abc"), "ok"),
        });

        assert!(effect.is_none());
        assert!(!store.sessions.is_authenticated());
        assert_eq!(store.page(), Page::Register);
    }

    #[test]
    fn test_same_page_navigation_does_not_refetch() {
        let (mut store, _flow) = logged_in();
        assert!(store.reduce(Action::Navigate("/login".to_string())).is_none());
        assert_eq!(store.router.path(), "/");
    }

    #[test]
    fn test_location_bar_navigates() {
        let (mut store, _rx) = store("/login");
        store.reduce(Action::OpenLocation);
        assert_eq!(store.app.location.value(), "/login");

        for _ in 0.."login".len() {
            store.reduce(Action::DeleteChar);
        }
        type_text(&mut store, "register");
        store.reduce(Action::SubmitLocation);

        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert_eq!(store.page(), Page::Register);
        assert!(store.login_form.login.is_blank());
    }

    #[test]
    fn test_logout_returns_to_login() {
        let (mut store, _flow) = logged_in();
        store.reduce(Action::ToggleOrderAction);
        assert_eq!(
            store.dashboard.as_ref().unwrap().action(),
            OrderAction::Withdraw
        );

        assert!(store.reduce(Action::Logout).is_none());
        assert!(!store.sessions.is_authenticated());
        assert_eq!(store.page(), Page::Login);
        assert!(store.dashboard.is_none());
    }
}
