//! Refund request and response types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::amount::MoneyAmount;
use super::datetime;

/// How much of the bill a refund returned.
///
/// This describes completeness, not a processing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    Partial,
    Full,
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundStatus::Partial => write!(f, "PARTIAL"),
            RefundStatus::Full => write!(f, "FULL"),
        }
    }
}

/// Request body for `PUT {billId}/refunds/{refundId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundBillRequest {
    pub amount: MoneyAmount,
}

/// A refund as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    /// The merchant-chosen refund identifier.
    pub refund_id: String,
    pub amount: MoneyAmount,
    pub status: RefundStatus,
    /// When the refund was processed.
    #[serde(with = "datetime")]
    pub date_time: OffsetDateTime,
}
