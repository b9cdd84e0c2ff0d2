//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, network effects and rendering.

use crate::api::{GophermartApi, ReqwestTransport};
use crate::config::Config;
use crate::dashboard::flow;
use crate::error::Result;
use crate::events::{EventConfig, EventHandler, EventLoop};
use crate::state::{Action, AuthTicket, Effect, FlowTicket, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// API client.
    api: GophermartApi,
    ui: Ui,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.api)?;
        let api = GophermartApi::new(config.api.base_url.clone(), Arc::new(transport));
        info!(base_url = %api.base_url(), "Using Gophermart API");

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(
            action_tx,
            &config.ui.start_path,
            config.ui.alert_duration(),
        );
        let event_handler = EventHandler::new(config.keybindings.clone());
        let ui = Ui::new(&config);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            api,
            ui,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        let event_config = EventConfig::default()
            .with_tick_rate(self.config.ui.tick_rate())
            .with_mouse_capture(self.config.ui.mouse_support);
        let (mut events, event_task) = EventLoop::new(event_config).start();

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                self.ui.render(frame, &self.store);
            })?;

            tokio::select! {
                // Handle terminal events
                Some(event) = events.recv() => {
                    if let Some(action) = self.event_handler.handle_event(event) {
                        self.handle_action(action);
                    }
                }

                // Handle actions reported by finished tasks
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        event_task.abort();
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        if let Some(effect) = self.store.reduce(action) {
            spawn_effect(&self.api, self.store.sender(), effect);
        }
    }
}

/// Run `effect` in the background and report its result on `action_tx`.
pub fn spawn_effect(
    api: &GophermartApi,
    action_tx: mpsc::UnboundedSender<Action>,
    effect: Effect,
) -> JoinHandle<()> {
    let api = api.clone();
    let flow_id = Uuid::new_v4();

    match effect {
        Effect::Authenticate(AuthTicket {
            generation,
            request,
        }) => {
            let span = info_span!("auth", %flow_id, mode = ?request.mode);
            tokio::spawn(
                async move {
                    let response = api
                        .authenticate(request.mode.endpoint(), &request.login, &request.password)
                        .await;
                    debug!(success = response.success, "Auth call finished");
                    let action = Action::AuthCompleted {
                        generation,
                        login: request.login,
                        response,
                    };
                    if action_tx.send(action).is_err() {
                        debug!("App closed before auth result arrived");
                    }
                }
                .instrument(span),
            )
        }
        Effect::RunFlow(FlowTicket {
            generation,
            credential,
            request,
        }) => {
            let span = info_span!("flow", %flow_id, ?request);
            tokio::spawn(
                async move {
                    let outcome = flow::run(&api, &credential, request).await;
                    debug!(alert = ?outcome.alert, "Flow finished");
                    let action = Action::FlowCompleted {
                        generation,
                        outcome,
                    };
                    if action_tx.send(action).is_err() {
                        debug!("App closed before flow result arrived");
                    }
                }
                .instrument(span),
            )
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::testing::FakeBackend;
    use crate::auth::{AuthMode, AuthRequest};
    use crate::dashboard::FlowRequest;
    use crate::session::Credential;
    use crate::state::Balance;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_auth_effect_reports_completion() {
        let backend = FakeBackend::new();
        backend.respond(Method::Post, "/api/user/login", 401, "bad credentials");
        let api = GophermartApi::new("http://gophermart.test", backend.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let effect = Effect::Authenticate(AuthTicket {
            generation: 4,
            request: AuthRequest {
                mode: AuthMode::Login,
                login: "bob".to_string(),
                password: "x".to_string(),
            },
        });
        spawn_effect(&api, tx, effect).await.unwrap();

        match rx.recv().await {
            Some(Action::AuthCompleted {
                generation,
                login,
                response,
            }) => {
                assert_eq!(generation, 4);
                assert_eq!(login, "bob");
                assert_eq!(response.into_result(), Err("bad credentials".to_string()));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_flow_effect_reports_outcome() {
        let backend = FakeBackend::new();
        backend.respond(
            Method::Get,
            "/api/user/balance",
            200,
            r#"{"current": 500, "withdrawn": 0}"#,
        )
        .respond(Method::Get, "/api/user/orders", 204, "");
        let api = GophermartApi::new("http://gophermart.test", backend.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let effect = Effect::RunFlow(FlowTicket {
            generation: 2,
            credential: Credential::new("Bearer abc"),
            request: FlowRequest::Load,
        });
        spawn_effect(&api, tx, effect).await.unwrap();

        match rx.recv().await {
            Some(Action::FlowCompleted {
                generation,
                outcome,
            }) => {
                assert_eq!(generation, 2);
                assert_eq!(outcome.balance, Some(Balance::new(dec!(500), dec!(0))));
                assert_eq!(outcome.orders, Some(Vec::new()));
                assert_eq!(outcome.alert, None);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        for request in backend.requests() {
            assert_eq!(request.authorization.as_deref(), Some("Bearer abc"));
        }
    }
}
