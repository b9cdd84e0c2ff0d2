//! Data conversion between backend payloads and internal state types.

use crate::state::{Balance, Order, OrderStatus, Withdrawal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order record as the backend encodes it.
#[derive(Debug, Deserialize)]
struct WireOrder {
    number: String,
    status: OrderStatus,
    #[serde(default)]
    accrual: Option<Decimal>,
    uploaded_at: DateTime<Utc>,
}

/// Withdrawal record as the backend encodes it.
#[derive(Debug, Deserialize)]
struct WireWithdrawal {
    order: String,
    sum: Decimal,
    processed_at: DateTime<Utc>,
}

/// Login/register request body.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsBody<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

/// Withdraw request body. The backend expects `sum` as a JSON number.
#[derive(Debug, Serialize)]
pub(crate) struct WithdrawBody<'a> {
    pub order: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub sum: Decimal,
}

/// Converts backend payloads to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Parse a `GET /api/user/orders` body.
    pub fn parse_orders(body: &str) -> serde_json::Result<Vec<Order>> {
        let orders: Vec<WireOrder> = serde_json::from_str(body)?;
        Ok(orders.into_iter().map(Self::convert_order).collect())
    }

    /// Parse a `GET /api/user/balance` body.
    pub fn parse_balance(body: &str) -> serde_json::Result<Balance> {
        serde_json::from_str(body)
    }

    /// Parse a `GET /api/user/withdrawals` body.
    pub fn parse_withdrawals(body: &str) -> serde_json::Result<Vec<Withdrawal>> {
        let withdrawals: Vec<WireWithdrawal> = serde_json::from_str(body)?;
        Ok(withdrawals
            .into_iter()
            .map(|w| Withdrawal {
                order: w.order,
                sum: w.sum,
                processed_at: w.processed_at,
            })
            .collect())
    }

    fn convert_order(order: WireOrder) -> Order {
        Order {
            id: order.number,
            status: order.status,
            // The backend omits a zero accrual entirely
            accrual: order.accrual,
            uploaded_at: order.uploaded_at,
        }
    }
}
