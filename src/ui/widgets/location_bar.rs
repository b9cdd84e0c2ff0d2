//! Location bar at the bottom of the screen.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// Location bar widget.
pub struct LocationBar;

impl LocationBar {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, location_key: &str) {
        const PROMPT: &str = " Location: ";

        let (path, style, hint) = if store.app.is_editing_location() {
            (
                store.app.location.value(),
                Style::default().fg(Color::White),
                " Enter go, Esc cancel ",
            )
        } else {
            (
                store.router.path(),
                Style::default().fg(Color::Gray),
                "",
            )
        };

        let mut spans = vec![
            Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
            Span::styled(path.to_string(), style),
            Span::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray)),
        ];
        if !store.app.is_editing_location() {
            spans.push(Span::styled(
                format!("{location_key} to edit"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if store.app.is_editing_location() {
            let x = area.x + PROMPT.len() as u16 + store.app.location.cursor() as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}
