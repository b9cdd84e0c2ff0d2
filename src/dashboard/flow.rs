//! Dashboard network sequences.
//!
//! Every flow except the explicit refresh starts with a baseline read of
//! balance and orders, performs the requested mutation only if that read
//! succeeded, and re-reads the resource the mutation touched. Each step
//! either continues or stops with the outcome to display.

use crate::api::GophermartApi;
use crate::session::Credential;
use crate::state::{Balance, Order, Withdrawal};
use rust_decimal::Decimal;

/// What the user asked the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowRequest {
    /// Show balance and orders.
    Load,
    /// Upload an order for accrual.
    Accrue { order_id: String },
    /// Spend points against an order.
    Withdraw { order_id: String, amount: Decimal },
    /// Best-effort re-read of orders and balance.
    Refresh,
    /// Read the withdrawal history.
    Withdrawals,
}

/// Result of a flow, applied to the dashboard as one unit.
///
/// `None` for a resource means "keep what is displayed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowOutcome {
    pub balance: Option<Balance>,
    pub orders: Option<Vec<Order>>,
    pub withdrawals: Option<Vec<Withdrawal>>,
    /// Message for the inline alert.
    pub alert: Option<String>,
}

impl FlowOutcome {
    /// Nothing changes and nothing is shown.
    pub fn unchanged() -> Self {
        Self::default()
    }

    fn halted(message: String) -> Self {
        Self {
            alert: Some(message),
            ..Self::default()
        }
    }

    fn rendered(balance: Balance, orders: Vec<Order>) -> Self {
        Self {
            balance: Some(balance),
            orders: Some(orders),
            ..Self::default()
        }
    }
}

/// Balance and orders read at the start of a flow.
#[derive(Debug, Clone)]
struct Baseline {
    balance: Balance,
    orders: Vec<Order>,
}

impl Baseline {
    /// Render the baseline alongside `message`.
    fn halt(&self, message: String) -> FlowOutcome {
        FlowOutcome {
            alert: Some(message),
            ..FlowOutcome::rendered(self.balance, self.orders.clone())
        }
    }
}

/// Run one flow to completion.
pub async fn run(api: &GophermartApi, credential: &Credential, request: FlowRequest) -> FlowOutcome {
    let result = match request {
        FlowRequest::Refresh => Ok(refresh(api, credential).await),
        FlowRequest::Withdrawals => withdrawals(api, credential).await,
        request => with_baseline(api, credential, request).await,
    };
    match result {
        Ok(outcome) | Err(outcome) => outcome,
    }
}

async fn with_baseline(
    api: &GophermartApi,
    credential: &Credential,
    request: FlowRequest,
) -> Result<FlowOutcome, FlowOutcome> {
    let balance = api
        .fetch_balance(credential)
        .await
        .into_result()
        .map_err(FlowOutcome::halted)?;
    let orders = api
        .fetch_orders(credential)
        .await
        .into_result()
        .map_err(|message| FlowOutcome {
            balance: Some(balance),
            ..FlowOutcome::halted(message)
        })?;
    let baseline = Baseline { balance, orders };

    match request {
        FlowRequest::Accrue { order_id } => {
            api.submit_order(&order_id, credential)
                .await
                .into_result()
                .map_err(|m| baseline.halt(m))?;
            // Accrual happens later on the server; only the order list moves
            let orders = api
                .fetch_orders(credential)
                .await
                .into_result()
                .map_err(|m| baseline.halt(m))?;
            Ok(FlowOutcome::rendered(baseline.balance, orders))
        }
        FlowRequest::Withdraw { order_id, amount } => {
            api.withdraw(&order_id, amount, credential)
                .await
                .into_result()
                .map_err(|m| baseline.halt(m))?;
            let balance = api
                .fetch_balance(credential)
                .await
                .into_result()
                .map_err(|m| baseline.halt(m))?;
            Ok(FlowOutcome::rendered(balance, baseline.orders))
        }
        _ => Ok(FlowOutcome::rendered(baseline.balance, baseline.orders)),
    }
}

/// Orders then balance; any failure leaves the view untouched, silently.
async fn refresh(api: &GophermartApi, credential: &Credential) -> FlowOutcome {
    let Ok(orders) = api.fetch_orders(credential).await.into_result() else {
        return FlowOutcome::unchanged();
    };
    let Ok(balance) = api.fetch_balance(credential).await.into_result() else {
        return FlowOutcome::unchanged();
    };
    FlowOutcome::rendered(balance, orders)
}

async fn withdrawals(
    api: &GophermartApi,
    credential: &Credential,
) -> Result<FlowOutcome, FlowOutcome> {
    let withdrawals = api
        .fetch_withdrawals(credential)
        .await
        .into_result()
        .map_err(FlowOutcome::halted)?;
    Ok(FlowOutcome {
        withdrawals: Some(withdrawals),
        ..FlowOutcome::default()
    })
}
