use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::types::{ForecastError, ForecastPair};
use crate::wire::AreaInfoResponse;

/// Anything that can produce a two-day forecast for a region id.
///
/// [`ForecastProvider`] is the HTTP implementation; tests substitute scripted sources.
pub trait ForecastSource: Send + Sync {
    fn fetch(
        &self,
        region_id: &str,
    ) -> impl Future<Output = Result<ForecastPair, ForecastError>> + Send;
}

/// HTTP client for the `areainfo` backend.
#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: Url,
}

impl ForecastProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ForecastError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ForecastError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/areainfo/{region_id}`, with the id percent-encoded as one segment.
    pub fn endpoint(&self, region_id: &str) -> Result<Url, ForecastError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ForecastError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "areainfo", region_id]);
        Ok(url)
    }

    /// Fetch and normalize the forecast for `region_id`.
    ///
    /// Any non-2xx status, transport failure, or unreadable body is an error.
    pub async fn fetch(&self, region_id: &str) -> Result<ForecastPair, ForecastError> {
        let url = self.endpoint(region_id)?;
        tracing::debug!(%url, "Requesting forecast");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!(region_id, status = status.as_u16(), "Forecast response");

        if !status.is_success() {
            return Err(ForecastError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(AreaInfoResponse::from_json(&body)?.normalize())
    }
}

impl ForecastSource for ForecastProvider {
    fn fetch(
        &self,
        region_id: &str,
    ) -> impl Future<Output = Result<ForecastPair, ForecastError>> + Send {
        ForecastProvider::fetch(self, region_id)
    }
}
