//! Withdrawal history table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use super::order_table::{header_row, render_placeholder};
use crate::state::{Withdrawal, withdrawn_sum};

/// Withdrawal table widget.
pub struct WithdrawalTable;

impl WithdrawalTable {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        withdrawals: Option<&[Withdrawal]>,
        selected: Option<usize>,
    ) {
        let Some(withdrawals) = withdrawals else {
            render_placeholder(frame, area, " Withdrawals ", "Withdrawals not loaded");
            return;
        };

        let rows = withdrawals.iter().map(|w| {
            Row::new(vec![
                Cell::from(w.order.clone()),
                Cell::from(format!("{:.2}", w.sum)).style(Style::default().fg(Color::Magenta)),
                Cell::from(
                    w.processed_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Length(12),
                Constraint::Length(18),
            ],
        )
        .header(header_row(&["Order", "Sum", "Processed"]))
        .block(
            Block::default()
                .title(format!(
                    " Withdrawals ({:.2} points spent) ",
                    withdrawn_sum(withdrawals)
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(selected);

        frame.render_stateful_widget(table, area, &mut state);
    }
}
