//! Event handler for turning terminal events into actions.

use super::{Event, InputEvent, Key};
use crate::config::KeyBindings;
use crate::router::Page;
use crate::state::{Action, InputMode, Store};
use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Handles input events and produces actions.
#[derive(Debug)]
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store state relevant to key mapping.
    snapshot: StoreSnapshot,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoreSnapshot {
    input_mode: InputMode,
    page: Page,
    show_help: bool,
}

impl EventHandler {
    /// Create a new event handler with the given key bindings.
    pub fn new(keybindings: KeyBindings) -> Self {
        Self {
            keybindings,
            snapshot: StoreSnapshot {
                input_mode: InputMode::Normal,
                page: Page::Login,
                show_help: false,
            },
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.snapshot = StoreSnapshot {
            input_mode: store.app.input_mode,
            page: store.page(),
            show_help: store.app.show_help,
        };
    }

    /// Map a terminal event to an action.
    pub fn handle_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Tick => Some(Action::Tick),
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Terminal will automatically redraw
            Event::Resize(_, _) => None,
        }
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let input = InputEvent::from(key);

        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }

        match self.snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input),
            InputMode::Location => self.handle_location_mode(input),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, input: InputEvent) -> Option<Action> {
        let bindings = &self.keybindings;

        if input.matches(&bindings.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&bindings.back) {
            return Some(if self.snapshot.show_help {
                Action::ToggleHelp
            } else {
                Action::DismissAlert
            });
        }
        if input.matches(&bindings.location) {
            return Some(Action::OpenLocation);
        }
        if input.matches(&bindings.logout) {
            return Some(Action::Logout);
        }
        if input.matches(&bindings.submit) {
            return Some(Action::Submit);
        }
        if input.matches(&bindings.next_field) || input.key == Key::BackTab {
            return Some(Action::FocusNext);
        }

        if self.snapshot.page == Page::Home
            && let Some(action) = self.handle_dashboard(input)
        {
            return Some(action);
        }

        self.handle_editing(input)
    }

    fn handle_dashboard(&self, input: InputEvent) -> Option<Action> {
        let bindings = &self.keybindings;

        if input.matches(&bindings.toggle_action) {
            Some(Action::ToggleOrderAction)
        } else if input.matches(&bindings.refresh) {
            Some(Action::RefreshOrders)
        } else if input.matches(&bindings.withdrawals) {
            Some(Action::ToggleWithdrawals)
        } else {
            match input.key {
                Key::Up => Some(Action::ScrollUp),
                Key::Down => Some(Action::ScrollDown),
                _ => None,
            }
        }
    }

    fn handle_location_mode(&self, input: InputEvent) -> Option<Action> {
        match input.key {
            Key::Escape => Some(Action::CancelLocation),
            Key::Enter => Some(Action::SubmitLocation),
            _ => self.handle_editing(input),
        }
    }

    /// Keys that edit whichever text input has focus.
    fn handle_editing(&self, input: InputEvent) -> Option<Action> {
        if let Some(c) = input.text_char() {
            return Some(Action::InputChar(c));
        }
        match input.key {
            Key::Backspace => Some(Action::DeleteChar),
            Key::Left => Some(Action::CursorLeft),
            Key::Right => Some(Action::CursorRight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn handler(input_mode: InputMode, page: Page) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default());
        handler.snapshot = StoreSnapshot {
            input_mode,
            page,
            show_help: false,
        };
        handler
    }

    fn press(handler: &EventHandler, code: KeyCode, mods: KeyModifiers) -> Option<Action> {
        handler.handle_event(Event::Key(KeyEvent::new(code, mods)))
    }

    #[test]
    fn test_typing_goes_to_inputs() {
        let handler = handler(InputMode::Normal, Page::Login);
        assert!(matches!(
            press(&handler, KeyCode::Char('b'), KeyModifiers::NONE),
            Some(Action::InputChar('b'))
        ));
        assert!(matches!(
            press(&handler, KeyCode::Backspace, KeyModifiers::NONE),
            Some(Action::DeleteChar)
        ));
        assert!(matches!(
            press(&handler, KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::Submit)
        ));
    }

    #[test]
    fn test_dashboard_bindings_only_on_home() {
        let home = handler(InputMode::Normal, Page::Home);
        assert!(matches!(
            press(&home, KeyCode::Char('a'), KeyModifiers::CONTROL),
            Some(Action::ToggleOrderAction)
        ));
        assert!(matches!(
            press(&home, KeyCode::Char('u'), KeyModifiers::CONTROL),
            Some(Action::RefreshOrders)
        ));
        assert!(matches!(
            press(&home, KeyCode::Char('w'), KeyModifiers::CONTROL),
            Some(Action::ToggleWithdrawals)
        ));

        let login = handler(InputMode::Normal, Page::Login);
        assert!(press(&login, KeyCode::Char('u'), KeyModifiers::CONTROL).is_none());
    }

    #[test]
    fn test_location_mode() {
        let handler = handler(InputMode::Location, Page::Home);
        assert!(matches!(
            press(&handler, KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::SubmitLocation)
        ));
        assert!(matches!(
            press(&handler, KeyCode::Esc, KeyModifiers::NONE),
            Some(Action::CancelLocation)
        ));
        assert!(matches!(
            press(&handler, KeyCode::Char('/'), KeyModifiers::NONE),
            Some(Action::InputChar('/'))
        ));
        // Dashboard shortcuts are suspended while editing the location
        assert!(press(&handler, KeyCode::Char('a'), KeyModifiers::CONTROL).is_none());
    }

    #[test]
    fn test_global_bindings() {
        let editing = handler(InputMode::Location, Page::NotFound);
        assert!(matches!(
            press(&editing, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        ));

        let normal = handler(InputMode::Normal, Page::NotFound);
        assert!(matches!(
            press(&normal, KeyCode::Char('l'), KeyModifiers::CONTROL),
            Some(Action::OpenLocation)
        ));
        assert!(matches!(
            press(&normal, KeyCode::F(1), KeyModifiers::NONE),
            Some(Action::ToggleHelp)
        ));
        assert!(matches!(normal.handle_event(Event::Tick), Some(Action::Tick)));
    }
}
