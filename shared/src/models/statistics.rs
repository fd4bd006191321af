//! Sale statistics model
//!
//! The statistics endpoint answers with sale summaries already grouped by
//! period key (`"YYYY-MM"`). JSON objects carry no order, so the map is
//! kept as a plain `HashMap` here and ordered on the client side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::sale::SalePayload;

/// One sold item or sale counted in the statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    /// ISO-8601 date of the sale
    pub sale_date: String,
    /// Total price in cents
    pub total_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SaleSummary {
    /// Summarize a stored sale; `None` when its total overflows
    pub fn from_payload(sale: &SalePayload) -> Option<Self> {
        Some(Self {
            sale_date: sale.date.clone(),
            total_price: sale.total_price()?,
            label: sale.member_full_name.clone(),
        })
    }
}

/// Statistics query response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    #[serde(default)]
    pub items_by_period: HashMap<String, Vec<SaleSummary>>,
}
