use crate::core::CardSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Card data fetched with a single GET, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        validate_url("source", url)?;

        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            url: url.to_string(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl CardSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CatalogError::data_load(
                &self.url,
                format!("server answered {}", response.status()),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
