use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::ProviderTransport;
use crate::cache::ResponseCache;
use crate::config::ThaifinConfig;
use crate::data_source::{ListingEntry, SourceError, SourceFuture, StatementSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{parse_security_id, ProviderId, StatementKeySpace};
use crate::{FinancialMetrics, FinancialPeriodRecord, YearlyMarkerPolicy};

/// Finnomena statement adapter.
///
/// Statements are keyed by UUID security id; the yearly aggregate row of a
/// fiscal year carries quarter `9`.
#[derive(Clone)]
pub struct FinnomenaAdapter {
    transport: ProviderTransport,
    base_url: String,
}

impl FinnomenaAdapter {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        cache: Arc<dyn ResponseCache>,
        config: &ThaifinConfig,
    ) -> Self {
        Self {
            transport: ProviderTransport::new(
                ProviderId::Finnomena,
                http_client,
                cache,
                config.request_timeout_ms,
            )
            .with_ttl(config.cache_ttl),
            base_url: config.statement_base_url.clone(),
        }
    }

    /// Uncached adapter against `base_url`.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            transport: ProviderTransport::uncached(ProviderId::Finnomena, http_client),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn listing_request(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/stock/list", self.base_url)).with_query("exchange", "TH")
    }

    pub fn summary_url(&self, security_id: &str) -> String {
        format!("{}/stock/summary/{security_id}", self.base_url)
    }

    async fn fetch_listing(&self) -> Result<Vec<ListingEntry>, SourceError> {
        let envelope: Envelope<ListingDatum> =
            self.transport.fetch_json(self.listing_request()).await?;
        let data = self.unwrap_envelope(envelope, "stock listing")?;

        let listing = data
            .into_iter()
            .map(|datum| ListingEntry {
                symbol: datum.name.trim().to_ascii_uppercase(),
                name_en: non_blank(datum.en_name),
                name_th: non_blank(datum.th_name),
                statement_id: datum.security_id,
                exchange: non_blank(datum.exchange),
            })
            .collect::<Vec<_>>();

        debug!(count = listing.len(), "statement listing loaded");
        Ok(listing)
    }

    async fn fetch_statements(&self, key: &str) -> Result<Vec<FinancialPeriodRecord>, SourceError> {
        let security_id = parse_security_id(key)
            .map_err(|error| SourceError::invalid_request(error.to_string()))?;

        let envelope: Envelope<SummaryDatum> = self
            .transport
            .fetch_json(HttpRequest::get(self.summary_url(&security_id)))
            .await?;
        let data = self.unwrap_envelope(envelope, "financial summary")?;

        Ok(data
            .into_iter()
            .map(|datum| FinancialPeriodRecord {
                security_id: datum.security_id.unwrap_or_else(|| security_id.clone()),
                fiscal_year: datum.fiscal,
                period_marker: Some(datum.quarter),
                metrics: datum.metrics,
            })
            .collect())
    }

    fn unwrap_envelope<T>(&self, envelope: Envelope<T>, what: &str) -> Result<Vec<T>, SourceError> {
        if envelope.status_code != 200 || envelope.status == Some(false) {
            return Err(SourceError::unavailable(format!(
                "{} {what} reported status code {}",
                self.transport.provider(),
                envelope.status_code
            )));
        }

        match envelope.data {
            Some(data) if !data.is_empty() => Ok(data),
            _ => Err(SourceError::empty_result(format!(
                "{} {what} contains no data",
                self.transport.provider()
            ))),
        }
    }
}

impl StatementSource for FinnomenaAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Finnomena
    }

    fn key_space(&self) -> StatementKeySpace {
        StatementKeySpace::SecurityId
    }

    fn yearly_policy(&self) -> YearlyMarkerPolicy {
        YearlyMarkerPolicy::Nine
    }

    fn listing<'a>(&'a self) -> SourceFuture<'a, Vec<ListingEntry>> {
        Box::pin(self.fetch_listing())
    }

    fn statements<'a>(&'a self, key: &'a str) -> SourceFuture<'a, Vec<FinancialPeriodRecord>> {
        Box::pin(self.fetch_statements(key))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Option<bool>,
    #[serde(rename = "statusCode")]
    status_code: u16,
    #[serde(default = "Option::default")]
    data: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct ListingDatum {
    name: String,
    #[serde(default)]
    th_name: Option<String>,
    #[serde(default)]
    en_name: Option<String>,
    security_id: String,
    #[serde(default)]
    exchange: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDatum {
    #[serde(default)]
    security_id: Option<String>,
    fiscal: i32,
    quarter: u8,
    #[serde(flatten)]
    metrics: FinancialMetrics,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
