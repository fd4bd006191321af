//! HTTP client for the membership backend
//!
//! Successful calls answer with an [`ApiResponse`] envelope; failed calls
//! answer with an [`ApiErrorBody`] and a non-2xx status.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use shared::error::ApiErrorBody;
use shared::models::ExportFile;
use shared::response::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete(&self, path: &str) -> ClientResult<()>;
    /// POST without body and return the raw response bytes
    async fn download(&self, path: &str) -> ClientResult<ExportFile>;
    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
            return Err(body.into());
        }
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Internal(text),
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let envelope: ApiResponse<T> = response.json().await?;
        Ok(envelope.into_data()?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.get(self.url(path)));
        Self::handle_response(req.send().await?).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        Self::handle_response(req.send().await?).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        Self::handle_response(req.send().await?).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let req = self.authorize(self.client.delete(self.url(path)));
        Self::check_status(req.send().await?).await?;
        Ok(())
    }

    async fn download(&self, path: &str) -> ClientResult<ExportFile> {
        let req = self.authorize(
            self.client
                .post(self.url(path))
                .header(header::CONTENT_TYPE, "application/json"),
        );
        let response = Self::check_status(req.send().await?).await?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await?;
        Ok(ExportFile::new(content_type, bytes.to_vec()))
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://pos.local/")).unwrap();
        assert_eq!(client.base_url(), "http://pos.local");
        assert_eq!(client.url("api/sales"), "http://pos.local/api/sales");
        assert_eq!(client.url("/api/sales/3"), "http://pos.local/api/sales/3");
    }

    #[test]
    fn test_token_from_config() {
        let config = ClientConfig::new("http://pos.local").with_token("secret");
        let client = NetworkHttpClient::new(&config).unwrap();
        assert_eq!(client.token(), Some("secret"));
        let client = client.with_token("other");
        assert_eq!(client.token(), Some("other"));
    }
}
