//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, help_key: &str) {
        let user = match store.sessions.active() {
            Some(session) => Span::styled(
                format!("● {}", session.user_id),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled("○ Not signed in", Style::default().fg(Color::Red)),
        };

        let page = Span::styled(
            format!(" {} ", store.page().title()),
            Style::default().fg(Color::Yellow),
        );

        let busy = store.login_form.is_submitting()
            || store.register_form.is_submitting()
            || store.dashboard.as_ref().is_some_and(|d| d.is_in_flight());
        let loading = if busy {
            Span::styled(
                " Working... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(
            format!(" {help_key} for help "),
            Style::default().fg(Color::Gray),
        );

        let status_line = Line::from(vec![
            Span::styled(
                " Gophermart ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            user,
            Span::raw(" | "),
            page,
            loading,
        ]);

        // Right-align the help hint
        let left_len = status_line.width();
        let padding = (area.width as usize).saturating_sub(left_len + help_hint.width());

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
