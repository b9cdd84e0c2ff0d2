//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = section("Navigation");
        help_text.extend([
            binding(&keys.location, "Edit location (/, /login, /register)"),
            binding(&keys.next_field, "Next field"),
            binding(&keys.submit, "Submit / OK"),
            binding(&keys.back, "Dismiss alert / close help"),
        ]);
        help_text.extend(section("Dashboard"));
        help_text.extend([
            binding(&keys.toggle_action, "Switch upload / withdraw"),
            binding(&keys.refresh, "Update orders and balance"),
            binding(&keys.withdrawals, "Toggle withdrawal history"),
            binding("↑/↓", "Move selection"),
            binding(&keys.logout, "Log out"),
        ]);
        help_text.extend(section("General"));
        help_text.extend([
            binding(&keys.help, "Toggle help"),
            binding(&keys.quit, "Quit"),
        ]);

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

fn section(title: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ]
}

fn binding(key: &str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<8}"), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
