mod finnomena;
mod thai_securities;

pub use finnomena::FinnomenaAdapter;
pub use thai_securities::ThaiSecuritiesAdapter;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::{CacheStore, ResponseCache};
use crate::data_source::SourceError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::ProviderId;

/// Read-through fetch path shared by the adapters: cache lookup, transport
/// call, status mapping, schema validation, cache fill.
#[derive(Clone)]
pub(crate) struct ProviderTransport {
    provider: ProviderId,
    http_client: Arc<dyn HttpClient>,
    cache: Arc<dyn ResponseCache>,
    timeout_ms: u64,
    ttl: Option<Duration>,
}

impl ProviderTransport {
    pub(crate) fn new(
        provider: ProviderId,
        http_client: Arc<dyn HttpClient>,
        cache: Arc<dyn ResponseCache>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            provider,
            http_client,
            cache,
            timeout_ms,
            ttl: None,
        }
    }

    /// Transport with no cache in front of it.
    pub(crate) fn uncached(provider: ProviderId, http_client: Arc<dyn HttpClient>) -> Self {
        Self::new(provider, http_client, Arc::new(CacheStore::disabled()), 10_000)
    }

    pub(crate) fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<T, SourceError> {
        let request = request
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);
        let key = request.full_url();

        if let Some(body) = self.cache.get(&key).await {
            debug!(provider = %self.provider, url = %key, "cache hit");
            return self.decode(&body);
        }

        debug!(provider = %self.provider, url = %key, "fetching");
        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!(
                    "{} transport error: {}",
                    self.provider,
                    error.message()
                ))
            } else {
                SourceError::internal(format!(
                    "{} transport error: {}",
                    self.provider,
                    error.message()
                ))
            }
        })?;

        if !response.is_success() {
            return Err(match response.status {
                404 => SourceError::not_found(format!(
                    "{} has no resource at {key}",
                    self.provider
                )),
                429 => SourceError::rate_limited(format!(
                    "{} rate limit exceeded",
                    self.provider
                )),
                status => SourceError::unavailable(format!(
                    "{} upstream returned status {status}",
                    self.provider
                )),
            });
        }

        let decoded = self.decode(&response.body)?;
        self.cache.put(key, response.body, self.ttl).await;
        Ok(decoded)
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T, SourceError> {
        serde_json::from_str(body).map_err(|error| SourceError::schema(self.provider, error))
    }

    pub(crate) const fn provider(&self) -> ProviderId {
        self.provider
    }
}
