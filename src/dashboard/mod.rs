//! Dashboard controller.
//!
//! Owns the balance, order list, withdrawal history and alert shown on the
//! home page, plus the order form driving the accrue/withdraw flows. All
//! network work happens in [`flow`]; this type only decides which flow to
//! start and folds finished flows back into view state.

pub mod flow;

pub use flow::{FlowOutcome, FlowRequest};

use crate::state::{Alert, Balance, Order, TextInput, Withdrawal};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shown when a withdraw is requested without a usable amount.
pub const INVALID_AMOUNT_MESSAGE: &str = "withdraw amount must be a positive number";

/// What the OK control does with the order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderAction {
    /// Upload the order for accrual.
    #[default]
    Accrue,
    /// Spend points against the order.
    Withdraw,
}

impl OrderAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Accrue => "Upload order",
            Self::Withdraw => "Withdraw points",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Accrue => Self::Withdraw,
            Self::Withdraw => Self::Accrue,
        }
    }
}

/// Focusable inputs of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardField {
    #[default]
    OrderId,
    Amount,
}

/// Which history table is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Orders,
    Withdrawals,
}

/// Derived visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub amount_field: bool,
    pub refresh_control: bool,
    pub points_badge: bool,
}

/// Home page state.
#[derive(Debug)]
pub struct Dashboard {
    user_id: String,
    pub order_id: TextInput,
    pub amount: TextInput,
    focus: DashboardField,
    action: OrderAction,
    panel: Panel,
    balance: Option<Balance>,
    orders: Option<Vec<Order>>,
    withdrawals: Option<Vec<Withdrawal>>,
    alert: Option<Alert>,
    alert_ttl: Duration,
    in_flight: bool,
    /// Highlighted row in the visible table.
    pub selected: Option<usize>,
}

impl Dashboard {
    pub fn new(user_id: impl Into<String>, alert_ttl: Duration) -> Self {
        Self {
            user_id: user_id.into(),
            order_id: TextInput::new(),
            amount: TextInput::new(),
            focus: DashboardField::default(),
            action: OrderAction::default(),
            panel: Panel::default(),
            balance: None,
            orders: None,
            withdrawals: None,
            alert: None,
            alert_ttl,
            in_flight: false,
            selected: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn action(&self) -> OrderAction {
        self.action
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn focus(&self) -> DashboardField {
        self.focus
    }

    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    pub fn orders(&self) -> Option<&[Order]> {
        self.orders.as_deref()
    }

    pub fn withdrawals(&self) -> Option<&[Withdrawal]> {
        self.withdrawals.as_deref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Recompute the visibility flags from current state.
    pub fn visibility(&self) -> Visibility {
        Visibility {
            amount_field: self.action == OrderAction::Withdraw,
            refresh_control: self.orders.as_ref().is_some_and(|o| !o.is_empty()),
            points_badge: self.balance.is_some(),
        }
    }

    pub fn toggle_action(&mut self) {
        self.action = self.action.toggled();
        if !self.visibility().amount_field {
            self.focus = DashboardField::OrderId;
        }
    }

    /// Move focus to the next visible input.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            DashboardField::OrderId if self.visibility().amount_field => DashboardField::Amount,
            _ => DashboardField::OrderId,
        };
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            DashboardField::OrderId => &mut self.order_id,
            DashboardField::Amount => &mut self.amount,
        }
    }

    /// Switch tables. Returns the flow to run when the withdrawal history
    /// should be (re)loaded.
    pub fn toggle_panel(&mut self) -> Option<FlowRequest> {
        if self.in_flight {
            debug!("Panel switch ignored while a flow is in flight");
            return None;
        }
        self.selected = None;
        self.panel = match self.panel {
            Panel::Orders => Panel::Withdrawals,
            Panel::Withdrawals => Panel::Orders,
        };
        match self.panel {
            Panel::Withdrawals => self.start(FlowRequest::Withdrawals),
            Panel::Orders => None,
        }
    }

    /// The initial load when the page is entered.
    pub fn load(&mut self) -> Option<FlowRequest> {
        self.start(FlowRequest::Load)
    }

    /// The OK control: build the flow for the current form contents.
    ///
    /// An empty order number only reloads. Withdrawals need a positive
    /// amount, checked before anything is sent.
    pub fn submit(&mut self, now: Instant) -> Option<FlowRequest> {
        if self.in_flight {
            debug!("Dashboard submit ignored while a flow is in flight");
            return None;
        }
        let order_id = self.order_id.value().trim().to_string();
        let request = if order_id.is_empty() {
            FlowRequest::Load
        } else {
            match self.action {
                OrderAction::Accrue => FlowRequest::Accrue { order_id },
                OrderAction::Withdraw => match parse_amount(self.amount.value()) {
                    Some(amount) => FlowRequest::Withdraw { order_id, amount },
                    None => {
                        self.alert = Some(Alert::error(INVALID_AMOUNT_MESSAGE, now));
                        return None;
                    }
                },
            }
        };
        self.start(request)
    }

    /// The update control. Only available while it is visible.
    pub fn refresh(&mut self) -> Option<FlowRequest> {
        if !self.visibility().refresh_control {
            return None;
        }
        self.start(FlowRequest::Refresh)
    }

    /// Fold a finished flow into view state.
    pub fn complete(&mut self, outcome: FlowOutcome, now: Instant) {
        self.in_flight = false;

        if let Some(balance) = outcome.balance {
            self.balance = Some(balance);
        }
        if let Some(orders) = outcome.orders {
            self.orders = Some(orders);
        }
        if let Some(withdrawals) = outcome.withdrawals {
            self.withdrawals = Some(withdrawals);
        }
        if let Some(message) = outcome.alert {
            self.alert = Some(Alert::error(message, now));
        }
        self.clamp_selection();
    }

    /// Drop the alert once it has been up long enough.
    pub fn tick(&mut self, now: Instant) {
        if self
            .alert
            .as_ref()
            .is_some_and(|a| a.is_expired(now, self.alert_ttl))
        {
            self.alert = None;
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Move the table highlight by `delta` rows.
    pub fn scroll(&mut self, delta: i32) {
        let len = self.visible_rows();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, len as i32 - 1);
        self.selected = Some(next as usize);
    }

    fn visible_rows(&self) -> usize {
        match self.panel {
            Panel::Orders => self.orders.as_ref().map_or(0, Vec::len),
            Panel::Withdrawals => self.withdrawals.as_ref().map_or(0, Vec::len),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows();
        self.selected = match self.selected {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    fn start(&mut self, request: FlowRequest) -> Option<FlowRequest> {
        if self.in_flight {
            debug!(?request, "Flow ignored while another is in flight");
            return None;
        }
        self.in_flight = true;
        Some(request)
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OrderStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    const TTL: Duration = Duration::from_secs(3);

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            status: OrderStatus::New,
            accrual: None,
            uploaded_at: Utc::now(),
        }
    }

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new("bob", TTL);
        dashboard.load();
        dashboard.complete(
            FlowOutcome {
                balance: Some(Balance::new(dec!(500), dec!(0))),
                orders: Some(vec![order("1"), order("2")]),
                ..FlowOutcome::default()
            },
            Instant::now(),
        );
        dashboard
    }

    #[test]
    fn test_initial_balance_failure_leaves_everything_unset() {
        let mut dashboard = Dashboard::new("bob", TTL);
        assert_eq!(dashboard.load(), Some(FlowRequest::Load));

        dashboard.complete(
            FlowOutcome {
                alert: Some("token expired".to_string()),
                ..FlowOutcome::default()
            },
            Instant::now(),
        );

        assert!(dashboard.orders().is_none());
        assert!(dashboard.balance().is_none());
        let visibility = dashboard.visibility();
        assert!(!visibility.points_badge);
        assert!(!visibility.refresh_control);
        assert_eq!(dashboard.alert().unwrap().message, "token expired");
    }

    #[test]
    fn test_failed_flow_keeps_prior_values() {
        let mut dashboard = loaded();
        dashboard.refresh();
        dashboard.complete(FlowOutcome::unchanged(), Instant::now());

        assert_eq!(dashboard.balance(), Some(&Balance::new(dec!(500), dec!(0))));
        assert_eq!(dashboard.orders().map(<[Order]>::len), Some(2));
        assert!(dashboard.alert().is_none());
    }

    #[test]
    fn test_visibility_derivations() {
        let mut dashboard = Dashboard::new("bob", TTL);
        assert_eq!(
            dashboard.visibility(),
            Visibility {
                amount_field: false,
                refresh_control: false,
                points_badge: false,
            }
        );

        dashboard.toggle_action();
        assert!(dashboard.visibility().amount_field);
        dashboard.toggle_action();
        assert!(!dashboard.visibility().amount_field);

        let dashboard = loaded();
        assert!(dashboard.visibility().refresh_control);
        assert!(dashboard.visibility().points_badge);
    }

    #[test]
    fn test_zero_balance_still_shows_badge() {
        let mut dashboard = Dashboard::new("bob", TTL);
        dashboard.load();
        dashboard.complete(
            FlowOutcome {
                balance: Some(Balance::new(Decimal::ZERO, Decimal::ZERO)),
                orders: Some(Vec::new()),
                ..FlowOutcome::default()
            },
            Instant::now(),
        );

        let visibility = dashboard.visibility();
        assert!(visibility.points_badge);
        assert!(!visibility.refresh_control);
    }

    #[test]
    fn test_submit_builds_requests() {
        let now = Instant::now();
        let mut dashboard = Dashboard::new("bob", TTL);

        assert_eq!(dashboard.submit(now), Some(FlowRequest::Load));
        dashboard.complete(FlowOutcome::unchanged(), now);

        dashboard.order_id = TextInput::with_value(" 12345678903 ");
        assert_eq!(
            dashboard.submit(now),
            Some(FlowRequest::Accrue {
                order_id: "12345678903".to_string()
            })
        );
        dashboard.complete(FlowOutcome::unchanged(), now);

        dashboard.toggle_action();
        dashboard.amount = TextInput::with_value("250.5");
        assert_eq!(
            dashboard.submit(now),
            Some(FlowRequest::Withdraw {
                order_id: "12345678903".to_string(),
                amount: dec!(250.5),
            })
        );
    }

    #[test]
    fn test_withdraw_amount_validated_before_sending() {
        let now = Instant::now();
        let mut dashboard = Dashboard::new("bob", TTL);
        dashboard.order_id = TextInput::with_value("2377225624");
        dashboard.toggle_action();

        for raw in ["", "abc", "0", "-5"] {
            dashboard.amount = TextInput::with_value(raw);
            assert_eq!(dashboard.submit(now), None, "amount {raw:?}");
            assert_eq!(dashboard.alert().unwrap().message, INVALID_AMOUNT_MESSAGE);
            assert!(!dashboard.is_in_flight());
        }
    }

    #[test]
    fn test_no_second_flow_while_in_flight() {
        let now = Instant::now();
        let mut dashboard = loaded();

        assert!(dashboard.submit(now).is_some());
        assert!(dashboard.submit(now).is_none());
        assert!(dashboard.refresh().is_none());
        assert!(dashboard.toggle_panel().is_none());

        dashboard.complete(FlowOutcome::unchanged(), now);
        assert!(dashboard.refresh().is_some());
    }

    #[test]
    fn test_refresh_requires_visible_control() {
        let mut dashboard = Dashboard::new("bob", TTL);
        assert_eq!(dashboard.refresh(), None);
        assert!(!dashboard.is_in_flight());
    }

    #[test]
    fn test_alert_expires() {
        let start = Instant::now();
        let mut dashboard = Dashboard::new("bob", TTL);
        dashboard.load();
        dashboard.complete(
            FlowOutcome {
                alert: Some("boom".to_string()),
                ..FlowOutcome::default()
            },
            start,
        );

        dashboard.tick(start + Duration::from_secs(1));
        assert!(dashboard.alert().is_some());
        dashboard.tick(start + TTL);
        assert!(dashboard.alert().is_none());
    }

    #[test]
    fn test_focus_skips_hidden_amount() {
        let mut dashboard = Dashboard::new("bob", TTL);
        dashboard.focus_next();
        assert_eq!(dashboard.focus(), DashboardField::OrderId);

        dashboard.toggle_action();
        dashboard.focus_next();
        assert_eq!(dashboard.focus(), DashboardField::Amount);

        dashboard.toggle_action();
        assert_eq!(dashboard.focus(), DashboardField::OrderId);
    }

    #[test]
    fn test_panel_toggle_and_scroll() {
        let mut dashboard = loaded();
        dashboard.scroll(5);
        assert_eq!(dashboard.selected, Some(1));
        dashboard.scroll(-9);
        assert_eq!(dashboard.selected, Some(0));

        assert_eq!(dashboard.toggle_panel(), Some(FlowRequest::Withdrawals));
        assert_eq!(dashboard.panel(), Panel::Withdrawals);
        assert_eq!(dashboard.selected, None);
        dashboard.complete(
            FlowOutcome {
                withdrawals: Some(Vec::new()),
                ..FlowOutcome::default()
            },
            Instant::now(),
        );
        assert_eq!(dashboard.withdrawals().map(<[Withdrawal]>::len), Some(0));

        assert_eq!(dashboard.toggle_panel(), None);
        assert_eq!(dashboard.panel(), Panel::Orders);
    }
}
