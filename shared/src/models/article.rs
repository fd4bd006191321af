//! Article Model (catalog entry sold at the counter)

use serde::{Deserialize, Serialize};

/// Catalog article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub name: String,
    /// Catalog price in cents. `None` means the price is typed at the counter.
    #[serde(default)]
    pub sale_price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Units in stock, when stock is tracked
    #[serde(default)]
    pub quantity: Option<i32>,
}
