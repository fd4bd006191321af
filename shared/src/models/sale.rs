//! Sale Model
//!
//! Wire representation of a sale, draft or finalized, as exchanged with
//! the `api/sales` endpoints.

use serde::{Deserialize, Serialize};

/// Payment designation of a sale
///
/// `Waiting` is reserved: it marks a sale saved as draft and is never a
/// real way of paying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Check,
    Card,
    Transfer,
    Waiting,
}

impl PaymentType {
    /// Sentinel written on every draft save
    pub const DRAFT: PaymentType = PaymentType::Waiting;

    /// Whether this is the draft sentinel rather than a payment method
    pub fn is_reserved(&self) -> bool {
        matches!(self, PaymentType::Waiting)
    }
}

/// One sold article line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLinePayload {
    pub article_id: i64,
    pub name: String,
    pub quantity: i32,
    /// Unit price in cents
    pub price: i64,
}

impl SaleLinePayload {
    /// Line total in cents, `None` on overflow
    pub fn total(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

/// Sale payload for create / update / fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub id: Option<i64>,
    /// ISO-8601 date-time
    pub date: String,
    #[serde(default)]
    pub items: Vec<SaleLinePayload>,
    pub member_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_full_name: Option<String>,
    pub payment_designation: Option<PaymentType>,
    #[serde(default)]
    pub finalized: bool,
}

impl SalePayload {
    /// Sum of all line totals in cents, `None` on overflow
    pub fn total_price(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |total, line| total.checked_add(line.total()?))
    }
}
