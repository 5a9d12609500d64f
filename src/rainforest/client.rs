// Rainforest API HTTP client.
// Issues a single product GET per lookup and decodes the JSON body; no retries.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{CacheError, Result};

use super::types::ProductData;

pub const RAINFOREST_API_BASE: &str = "https://api.rainforestapi.com/request";
pub const DEFAULT_AMAZON_DOMAIN: &str = "amazon.com";

/// Which identifier a product id is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Asin,
    Gtin,
}

impl IdKind {
    /// Query parameter the provider expects for this kind.
    pub fn param(&self) -> &'static str {
        match self {
            IdKind::Asin => "asin",
            IdKind::Gtin => "gtin",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Anything that can fetch a product record from upstream.
#[async_trait]
pub trait ProductFetcher: Send + Sync {
    async fn fetch(&self, kind: IdKind, id: &str) -> Result<ProductData>;
}

/// Rainforest API client.
pub struct RainforestClient {
    client: Client,
    base_url: String,
    api_key: String,
    amazon_domain: String,
}

impl RainforestClient {
    /// Create a new client against the given endpoint.
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("asin-cache"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CacheError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            amazon_domain: DEFAULT_AMAZON_DOMAIN.to_string(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(&config.base_url, &config.api_key, config.timeout)?;
        client.amazon_domain = config.amazon_domain.clone();
        Ok(client)
    }

    /// Make the product GET for one id.
    async fn get_product(&self, kind: IdKind, id: &str) -> Result<Response> {
        let params = [
            ("api_key", self.api_key.as_str()),
            ("amazon_domain", self.amazon_domain.as_str()),
            ("type", "product"),
            (kind.param(), id),
        ];
        debug!(%kind, id, "requesting product");
        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(CacheError::Transport)?;

        check_response(response).await
    }
}

#[async_trait]
impl ProductFetcher for RainforestClient {
    async fn fetch(&self, kind: IdKind, id: &str) -> Result<ProductData> {
        let response = self.get_product(kind, id).await?;
        let body = response.bytes().await?;
        let data: ProductData = serde_json::from_slice(&body)?;
        Ok(data)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(CacheError::Status {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}
