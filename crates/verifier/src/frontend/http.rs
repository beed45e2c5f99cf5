//! reqwest-backed frontend.

use std::time::Duration;

use async_trait::async_trait;
use common::{FrontendAddress, InputError};
use reqwest::{Client, Url};

use super::Frontend;
use crate::error::{FetchError, VerifyError};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends plain `GET http://<address>/` requests: no body, no query string.
#[derive(Debug, Clone)]
pub struct HttpFrontend {
    client: Client,
    address: FrontendAddress,
    url: Url,
}

impl HttpFrontend {
    /// Builds a frontend client with the given per-request timeout.
    pub fn new(address: FrontendAddress, timeout: Duration) -> Result<Self, VerifyError> {
        let invalid = |reason: String| InputError::InvalidFrontend {
            address: address.to_string(),
            reason,
        };

        let url = Url::parse(&address.url()).map_err(|err| invalid(err.to_string()))?;
        if url.path() != "/"
            || url.query().is_some()
            || url.fragment().is_some()
            || !url.username().is_empty()
            || url.password().is_some()
        {
            return Err(invalid(format!("request URL {url} is not a bare host[:port]")).into());
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| VerifyError::Client(FetchError::from(err).0))?;

        Ok(Self {
            client,
            address,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Frontend for HttpFrontend {
    fn address(&self) -> &FrontendAddress {
        &self.address
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(self.url.clone()).send().await?;

        // The body decides the outcome; status is only reported.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url = %self.url, "frontend returned non-success status");
        }

        Ok(response.text().await?)
    }
}
