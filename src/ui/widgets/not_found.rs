//! Catch-all page.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::layout::centered_fixed;

pub struct NotFoundView;

impl NotFoundView {
    pub fn render(frame: &mut Frame, area: Rect, path: &str, submit_key: &str) {
        let text = vec![
            Line::from(Span::styled(
                "404",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Nothing lives at {path}")),
            Line::from(""),
            Line::from(vec![
                Span::styled(submit_key.to_string(), Style::default().fg(Color::Cyan)),
                Span::raw(" back home"),
            ]),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title(" Not Found ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(paragraph, centered_fixed(48, 9, area));
    }
}
