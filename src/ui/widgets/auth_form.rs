//! Login and registration form.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::TextField;
use super::notifications::render_error;
use crate::auth::{AuthField, AuthForm, AuthMode, FormState};
use crate::router::{LOGIN_PATH, REGISTER_PATH};
use crate::ui::layout::centered_fixed;

/// Auth form view.
pub struct AuthFormView;

impl AuthFormView {
    /// Render `form` centered in `area`.
    pub fn render(frame: &mut Frame, area: Rect, form: &AuthForm, location_key: &str) {
        let popup = centered_fixed(52, 17, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", form.mode().title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Login
                Constraint::Length(3), // Password
                Constraint::Length(1), // Button
                Constraint::Length(1), // Switch hint
                Constraint::Min(3),    // Error
            ])
            .split(inner);

        TextField {
            label: "Login",
            input: &form.login,
            focused: form.focus() == AuthField::Login,
            masked: false,
        }
        .render(frame, chunks[0]);
        TextField {
            label: "Password",
            input: &form.password,
            focused: form.focus() == AuthField::Password,
            masked: true,
        }
        .render(frame, chunks[1]);

        let button = match form.state() {
            FormState::Submitting => Span::styled(
                "Please wait...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            _ => Span::styled(
                format!("[ Enter: {} ]", form.mode().button_label()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(button)), chunks[2]);

        let (other, path) = match form.mode() {
            AuthMode::Login => ("No account?", REGISTER_PATH),
            AuthMode::Register => ("Have an account?", LOGIN_PATH),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{other} "), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{location_key} → {path}"),
                    Style::default().fg(Color::Cyan),
                ),
            ])),
            chunks[3],
        );

        if let Some(error) = form.error() {
            render_error(frame, chunks[4], error);
        }
    }
}
