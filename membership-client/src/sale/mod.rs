//! Point-of-sale core
//!
//! - [`basket`]: lines, member and payment of the sale being built
//! - [`lifecycle`]: draft / finalized saves behind a request generation
//! - [`statistics`]: month buckets over stored sales
//! - [`store`]: backend gateway

pub mod basket;
pub mod error;
pub mod lifecycle;
pub mod statistics;
pub mod store;

pub use basket::{Basket, BasketItem, SaleState};
pub use error::{SaleError, SaleResult};
pub use lifecycle::{Completion, PendingSave, SaleSession, SaveKind};
pub use statistics::{PeriodKey, PeriodRow, SaleStatistics, StatisticsBucket};
pub use store::{HttpSaleStore, SaleStore};
