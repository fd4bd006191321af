//! Membership Client - point-of-sale core for the membership backend
//!
//! Builds baskets, saves them as drafts or finalized sales, and groups
//! stored sales into monthly statistics. Persistence goes through the
//! [`SaleStore`] trait, implemented over HTTP by [`HttpSaleStore`].

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod sale;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

pub use sale::{
    Basket, BasketItem, Completion, HttpSaleStore, PeriodKey, SaleError, SaleResult,
    SaleSession, SaleState, SaleStatistics, SaleStore,
};

// Re-export shared types for convenience
pub use shared::models::{Article, ExportFile, Member, PaymentType, SalePayload};
pub use shared::response::ApiResponse;
