use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Outbound GET returning the raw body of a 2xx response.
#[async_trait]
pub trait HttpTransport {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError>;
}

pub type Transport = Arc<dyn HttpTransport + Send + Sync>;

pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError> {
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}
