//! Home page: points badge, order form and history tables.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::notifications::render_alert;
use super::{OrderTable, TextField, WithdrawalTable};
use crate::config::KeyBindings;
use crate::dashboard::{Dashboard, DashboardField, OrderAction, Panel};

/// Dashboard view.
pub struct DashboardView;

impl DashboardView {
    pub fn render(frame: &mut Frame, area: Rect, dashboard: &Dashboard, keys: &KeyBindings) {
        let alert_height = if dashboard.alert().is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Badge
                Constraint::Length(3),            // Order form
                Constraint::Length(1),            // Controls
                Constraint::Length(alert_height), // Alert
                Constraint::Min(0),               // Table
            ])
            .split(area);

        render_badge(frame, chunks[0], dashboard);
        render_order_form(frame, chunks[1], dashboard);
        render_controls(frame, chunks[2], dashboard, keys);

        if let Some(alert) = dashboard.alert() {
            render_alert(frame, chunks[3], alert);
        }

        match dashboard.panel() {
            Panel::Orders => {
                OrderTable::render(frame, chunks[4], dashboard.orders(), dashboard.selected)
            }
            Panel::Withdrawals => WithdrawalTable::render(
                frame,
                chunks[4],
                dashboard.withdrawals(),
                dashboard.selected,
            ),
        }
    }
}

fn render_badge(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let mut spans = vec![Span::styled(
        format!(" {} ", dashboard.user_id()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if dashboard.visibility().points_badge
        && let Some(balance) = dashboard.balance()
    {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{:.2} points", balance.current),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("  ({:.2} withdrawn)", balance.withdrawn),
            Style::default().fg(Color::Gray),
        ));
    }

    let badge = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Balance ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(badge, area);
}

fn render_order_form(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let amount_visible = dashboard.visibility().amount_field;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(42),
            Constraint::Min(if amount_visible { 12 } else { 0 }),
        ])
        .split(area);

    TextField {
        label: "Order number",
        input: &dashboard.order_id,
        focused: dashboard.focus() == DashboardField::OrderId,
        masked: false,
    }
    .render(frame, chunks[0]);

    let radio = |action: OrderAction| {
        let selected = dashboard.action() == action;
        let mark = if selected { "(•)" } else { "( )" };
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!("{mark} {}  ", action.label()), style)
    };
    let actions = Paragraph::new(Line::from(vec![
        radio(OrderAction::Accrue),
        radio(OrderAction::Withdraw),
    ]))
    .block(Block::default().title(" Action ").borders(Borders::ALL));
    frame.render_widget(actions, chunks[1]);

    if amount_visible {
        TextField {
            label: "Amount",
            input: &dashboard.amount,
            focused: dashboard.focus() == DashboardField::Amount,
            masked: false,
        }
        .render(frame, chunks[2]);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, dashboard: &Dashboard, keys: &KeyBindings) {
    let key = |k: &str| Span::styled(format!(" {k} "), Style::default().fg(Color::Cyan));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(Color::Gray));

    let mut spans = vec![
        key(&keys.submit),
        label("OK"),
        key(&keys.toggle_action),
        label("switch action"),
    ];
    if dashboard.visibility().refresh_control {
        spans.push(key(&keys.refresh));
        spans.push(label("update"));
    }
    spans.push(key(&keys.withdrawals));
    spans.push(label(match dashboard.panel() {
        Panel::Orders => "withdrawals",
        Panel::Withdrawals => "orders",
    }));
    spans.push(key(&keys.logout));
    spans.push(label("log out"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
