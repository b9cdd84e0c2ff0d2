//! Order-related state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Processing status of an uploaded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Uploaded, not yet picked up for accrual.
    New,
    /// Accepted by the accrual system, calculation not started.
    Registered,
    /// Accrual calculation in progress.
    Processing,
    /// Accrual finished; points credited.
    Processed,
    /// Rejected by the accrual system.
    Invalid,
    /// Any status this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Registered => write!(f, "REGISTERED"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Processed => write!(f, "PROCESSED"),
            Self::Invalid => write!(f, "INVALID"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An order submitted for points accrual.
///
/// Orders are always replaced wholesale from server responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number.
    pub id: String,
    /// Processing status.
    pub status: OrderStatus,
    /// Points awarded, once known.
    pub accrual: Option<Decimal>,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl Order {
    /// Check if the accrual system is finished with this order.
    pub fn is_final(&self) -> bool {
        matches!(self.status, OrderStatus::Processed | OrderStatus::Invalid)
    }

    /// Accrued points, zero when none were awarded yet.
    pub fn accrual_or_zero(&self) -> Decimal {
        self.accrual.unwrap_or_default()
    }
}

/// Count orders still waiting on the accrual system.
pub fn pending_count(orders: &[Order]) -> usize {
    orders.iter().filter(|o| !o.is_final()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(id: &str, status: OrderStatus, accrual: Option<Decimal>) -> Order {
        Order {
            id: id.to_string(),
            status,
            accrual,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"PROCESSING\"").unwrap();
        assert_eq!(status, OrderStatus::Processing);
        assert_eq!(serde_json::to_string(&OrderStatus::New).unwrap(), "\"NEW\"");
    }

    #[test]
    fn test_accrual_statuses_are_accepted() {
        let status: OrderStatus = serde_json::from_str("\"REGISTERED\"").unwrap();
        assert_eq!(status, OrderStatus::Registered);
        assert_eq!(status.to_string(), "REGISTERED");

        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_final_and_pending() {
        let orders = vec![
            order("1", OrderStatus::New, None),
            order("2", OrderStatus::Processing, None),
            order("3", OrderStatus::Processed, Some(dec!(500))),
            order("4", OrderStatus::Invalid, None),
            order("5", OrderStatus::Registered, None),
        ];
        assert_eq!(pending_count(&orders), 3);
        assert!(orders[2].is_final());
        assert_eq!(orders[2].accrual_or_zero(), dec!(500));
        assert_eq!(orders[0].accrual_or_zero(), Decimal::ZERO);
    }
}
