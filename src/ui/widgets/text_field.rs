//! Single-line labelled input.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::TextInput;

/// A bordered text field bound to a [`TextInput`].
pub struct TextField<'a> {
    pub label: &'a str,
    pub input: &'a TextInput,
    pub focused: bool,
    /// Show bullets instead of the value.
    pub masked: bool,
}

impl TextField<'_> {
    /// Render the field and place the terminal cursor in it when focused.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = if self.masked {
            "•".repeat(self.input.value().chars().count())
        } else {
            self.input.value().to_string()
        };

        let border_style = if self.focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::raw(text))).block(block),
            area,
        );

        if self.focused && inner.width > 0 {
            let offset = (self.input.cursor() as u16).min(inner.width - 1);
            frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
        }
    }
}
