//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    AuthFormView, DashboardView, HelpPanel, LocationBar, NotFoundView, OrderTable, StatusBar,
    TextField, WithdrawalTable,
};

use crate::config::{Config, KeyBindings};
use crate::router::Page;
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
#[derive(Debug, Clone)]
pub struct Ui {
    keys: KeyBindings,
    show_status_bar: bool,
}

impl Ui {
    pub fn new(config: &Config) -> Self {
        Self {
            keys: config.keybindings.clone(),
            show_status_bar: config.ui.show_status_bar,
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area(), self.show_status_bar);

        if self.show_status_bar {
            StatusBar::render(frame, layout.status_area, store, &self.keys.help);
        }

        match store.page() {
            Page::Login => {
                AuthFormView::render(frame, layout.main_area, &store.login_form, &self.keys.location)
            }
            Page::Register => AuthFormView::render(
                frame,
                layout.main_area,
                &store.register_form,
                &self.keys.location,
            ),
            Page::Home => {
                if let Some(dashboard) = &store.dashboard {
                    DashboardView::render(frame, layout.main_area, dashboard, &self.keys);
                }
            }
            Page::NotFound => NotFoundView::render(
                frame,
                layout.main_area,
                store.router.path(),
                &self.keys.submit,
            ),
        }

        LocationBar::render(frame, layout.location_area, store, &self.keys.location);

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &self.keys);
        }
    }
}
