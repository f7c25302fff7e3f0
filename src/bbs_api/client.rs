use log::debug;
use reqwest::Client;
use url::Url;

use super::{
    default_headers, handle_response, parse_base_url, Query, QueryRequest, Result,
    DEFAULT_API_BASE,
};

/// Async BBS API client. The underlying connection pool lives as long as the
/// client, so one client should serve a query and the downloads that follow.
#[derive(Debug, Clone)]
pub struct BbsClient {
    client: Client,
    base_url: Url,
}

impl BbsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .default_headers(default_headers())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The HTTP client, preconfigured with the web frontend's headers.
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub async fn image_urls(&self, query: &Query, page_size: u32) -> Result<Vec<String>> {
        let request = query.request(page_size)?;
        self.execute(&request).await
    }

    pub async fn execute(&self, request: &QueryRequest) -> Result<Vec<String>> {
        let url = request.url(&self.base_url)?;
        debug!("GET {} {:?}", url, request.params);

        let response = self.client.get(url).query(&request.params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        handle_response(status, body, request.shape)
    }
}
