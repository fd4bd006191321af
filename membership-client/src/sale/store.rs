//! Sale persistence gateway
//!
//! [`SaleStore`] is the seam between the sale lifecycle and the backend.
//! [`HttpSaleStore`] talks to the REST API; tests plug in an in-memory one.

use async_trait::async_trait;
use shared::models::{ExportFile, SalePayload, StatisticsResponse};

use crate::ClientResult;
use crate::http::HttpClient;

/// Remote sale operations
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Store a new sale; the backend assigns a fresh id
    async fn create(&self, sale: &SalePayload) -> ClientResult<SalePayload>;

    /// Overwrite a sale, or create it when `id` is `None`
    async fn update(&self, sale: &SalePayload) -> ClientResult<SalePayload>;

    async fn fetch(&self, id: i64) -> ClientResult<SalePayload>;

    async fn delete(&self, id: i64) -> ClientResult<()>;

    /// Finalized sales, newest first
    async fn history(&self, offset: u32, limit: u32) -> ClientResult<Vec<SalePayload>>;

    /// Saved drafts waiting to be completed
    async fn drafts(&self) -> ClientResult<Vec<SalePayload>>;

    async fn statistics(&self) -> ClientResult<StatisticsResponse>;

    /// Statistics spreadsheet
    async fn export(&self) -> ClientResult<ExportFile>;
}

const SALES_PATH: &str = "api/sales";

/// [`SaleStore`] backed by the membership REST API
#[derive(Debug, Clone)]
pub struct HttpSaleStore<C> {
    http: C,
}

impl<C: HttpClient> HttpSaleStore<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }
}

#[async_trait]
impl<C: HttpClient> SaleStore for HttpSaleStore<C> {
    async fn create(&self, sale: &SalePayload) -> ClientResult<SalePayload> {
        self.http.post(SALES_PATH, sale).await
    }

    async fn update(&self, sale: &SalePayload) -> ClientResult<SalePayload> {
        self.http.put(SALES_PATH, sale).await
    }

    async fn fetch(&self, id: i64) -> ClientResult<SalePayload> {
        self.http.get(&format!("{}/{}", SALES_PATH, id)).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("{}/{}", SALES_PATH, id)).await
    }

    async fn history(&self, offset: u32, limit: u32) -> ClientResult<Vec<SalePayload>> {
        self.http
            .get(&format!(
                "{}/history?offset={}&limit={}",
                SALES_PATH, offset, limit
            ))
            .await
    }

    async fn drafts(&self) -> ClientResult<Vec<SalePayload>> {
        self.http.get(&format!("{}/temporary", SALES_PATH)).await
    }

    async fn statistics(&self) -> ClientResult<StatisticsResponse> {
        self.http.get(&format!("{}/statistics", SALES_PATH)).await
    }

    async fn export(&self) -> ClientResult<ExportFile> {
        self.http.download(&format!("{}/export", SALES_PATH)).await
    }
}
