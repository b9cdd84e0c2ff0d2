//! Order history table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::state::{Order, OrderStatus, pending_count};

/// Order table widget.
pub struct OrderTable;

impl OrderTable {
    /// Render the order list. `None` means it was never loaded.
    pub fn render(frame: &mut Frame, area: Rect, orders: Option<&[Order]>, selected: Option<usize>) {
        let Some(orders) = orders else {
            render_placeholder(frame, area, " Orders ", "Orders not loaded");
            return;
        };

        let header = header_row(&["Order", "Status", "Accrual", "Uploaded"]);

        let rows = orders.iter().map(|order| {
            let status_style = match order.status {
                OrderStatus::New | OrderStatus::Registered => Style::default().fg(Color::Yellow),
                OrderStatus::Processing => Style::default().fg(Color::Cyan),
                OrderStatus::Processed => Style::default().fg(Color::Green),
                OrderStatus::Invalid => Style::default().fg(Color::Red),
                OrderStatus::Unknown => Style::default().fg(Color::Gray),
            };
            let accrual = match order.accrual {
                Some(points) => format!("{points:.2}"),
                None => "-".to_string(),
            };

            Row::new(vec![
                Cell::from(order.id.clone()),
                Cell::from(order.status.to_string()).style(status_style),
                Cell::from(accrual),
                Cell::from(
                    order
                        .uploaded_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
            ])
            .height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(18),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Orders ({} total, {} pending) ",
                    orders.len(),
                    pending_count(orders)
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(selected);

        frame.render_stateful_widget(table, area, &mut state);
    }
}

pub(super) fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).height(1).bottom_margin(1)
}

pub(super) fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let placeholder = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(placeholder, area);
}
