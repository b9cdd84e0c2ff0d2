//! Balance and withdrawal state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loyalty points balance.
///
/// Always fetched fresh from the server, never computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Points available for withdrawal.
    pub current: Decimal,
    /// Points withdrawn over the account lifetime.
    pub withdrawn: Decimal,
}

impl Balance {
    /// Create a new balance.
    pub fn new(current: Decimal, withdrawn: Decimal) -> Self {
        Self { current, withdrawn }
    }

    /// Total points ever accrued.
    pub fn accrued_total(&self) -> Decimal {
        self.current + self.withdrawn
    }
}

/// A past withdrawal of points against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Order number the points were spent on.
    pub order: String,
    /// Points withdrawn.
    pub sum: Decimal,
    /// When the withdrawal was processed.
    pub processed_at: DateTime<Utc>,
}

/// Total points across a withdrawal history.
pub fn withdrawn_sum(withdrawals: &[Withdrawal]) -> Decimal {
    withdrawals.iter().map(|w| w.sum).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_from_server_json() {
        let balance: Balance =
            serde_json::from_str(r#"{"current": 500.5, "withdrawn": 42}"#).unwrap();
        assert_eq!(balance, Balance::new(dec!(500.5), dec!(42)));
        assert_eq!(balance.accrued_total(), dec!(542.5));
    }

    #[test]
    fn test_withdrawn_sum() {
        let withdrawals = vec![
            Withdrawal {
                order: "2377225624".to_string(),
                sum: dec!(500),
                processed_at: Utc::now(),
            },
            Withdrawal {
                order: "79927398713".to_string(),
                sum: dec!(12.5),
                processed_at: Utc::now(),
            },
        ];
        assert_eq!(withdrawn_sum(&withdrawals), dec!(512.5));
        assert_eq!(withdrawn_sum(&[]), Decimal::ZERO);
    }
}
