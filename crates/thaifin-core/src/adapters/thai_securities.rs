use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::ProviderTransport;
use crate::cache::ResponseCache;
use crate::config::ThaifinConfig;
use crate::data_source::{
    ListingEntry, RegistrySource, SourceError, SourceFuture, StatementSource,
};
use crate::http_client::{HttpClient, HttpRequest};
use crate::source::{ProviderId, StatementKeySpace};
use crate::{
    FinancialMetrics, FinancialPeriodRecord, Language, RegistryEntry, RegistryMetadata, Symbol,
    YearlyMarkerPolicy,
};

/// Thai Securities Data adapter.
///
/// Serves the registry snapshot (one JSON dump per language) and the legacy
/// per-ticker financials path, whose yearly rows carry no marker or `0`.
#[derive(Clone)]
pub struct ThaiSecuritiesAdapter {
    transport: ProviderTransport,
    base_url: String,
}

impl ThaiSecuritiesAdapter {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        cache: Arc<dyn ResponseCache>,
        config: &ThaifinConfig,
    ) -> Self {
        Self {
            transport: ProviderTransport::new(
                ProviderId::ThaiSecurities,
                http_client,
                cache,
                config.request_timeout_ms,
            )
            .with_ttl(config.cache_ttl),
            base_url: config.registry_base_url.clone(),
        }
    }

    /// Uncached adapter against `base_url`.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            transport: ProviderTransport::uncached(ProviderId::ThaiSecurities, http_client),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn snapshot_url(&self, language: Language) -> String {
        match language {
            Language::En => format!("{}/thai_securities_all.json", self.base_url),
            Language::Th => format!("{}/thai_securities_all_th.json", self.base_url),
        }
    }

    pub fn metadata_url(&self) -> String {
        format!("{}/metadata.json", self.base_url)
    }

    pub fn financials_url(&self, symbol: &str) -> String {
        format!(
            "{}/stocks/{}/financials",
            self.base_url,
            urlencoding::encode(symbol)
        )
    }

    async fn fetch_snapshot(&self, language: Language) -> Result<Vec<RegistryEntry>, SourceError> {
        let payload: SecuritiesPayload = self
            .transport
            .fetch_json(HttpRequest::get(self.snapshot_url(language)))
            .await?;

        let entries = payload
            .into_records()
            .into_iter()
            .filter_map(|(key, record)| normalize_security(key, record, language))
            .collect::<Vec<_>>();

        if entries.is_empty() {
            return Err(SourceError::empty_result(format!(
                "{} registry snapshot ({language}) lists no securities",
                self.transport.provider()
            )));
        }

        debug!(count = entries.len(), %language, "registry snapshot loaded");
        Ok(entries)
    }

    async fn fetch_financials(
        &self,
        symbol: &str,
    ) -> Result<Vec<FinancialPeriodRecord>, SourceError> {
        let payload: FinancialsPayload = self
            .transport
            .fetch_json(HttpRequest::get(self.financials_url(symbol)))
            .await?;

        let records = payload
            .into_rows()
            .into_iter()
            .map(|row| FinancialPeriodRecord {
                security_id: symbol.to_owned(),
                fiscal_year: row.fiscal_year,
                period_marker: row.quarter,
                metrics: row.metrics,
            })
            .collect::<Vec<_>>();

        if records.is_empty() {
            return Err(SourceError::empty_result(format!(
                "{} returned no financial periods for {symbol}",
                self.transport.provider()
            )));
        }

        Ok(records)
    }
}

impl RegistrySource for ThaiSecuritiesAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ThaiSecurities
    }

    fn snapshot<'a>(&'a self, language: Language) -> SourceFuture<'a, Vec<RegistryEntry>> {
        Box::pin(self.fetch_snapshot(language))
    }

    fn metadata<'a>(&'a self) -> SourceFuture<'a, RegistryMetadata> {
        Box::pin(async move {
            self.transport
                .fetch_json(HttpRequest::get(self.metadata_url()))
                .await
        })
    }
}

impl StatementSource for ThaiSecuritiesAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ThaiSecurities
    }

    fn key_space(&self) -> StatementKeySpace {
        StatementKeySpace::Ticker
    }

    fn yearly_policy(&self) -> YearlyMarkerPolicy {
        YearlyMarkerPolicy::ZeroOrAbsent
    }

    fn listing<'a>(&'a self) -> SourceFuture<'a, Vec<ListingEntry>> {
        Box::pin(async move { Ok(Vec::new()) })
    }

    fn statements<'a>(&'a self, key: &'a str) -> SourceFuture<'a, Vec<FinancialPeriodRecord>> {
        Box::pin(self.fetch_financials(key))
    }
}

/// Security object as published in the registry dump.
#[derive(Debug, Clone, Deserialize)]
struct SecurityRecord {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_th: Option<String>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, alias = "website")]
    web: Option<String>,
    #[serde(default)]
    stock_type: Option<String>,
}

/// The dump has shipped as a bare array, a wrapped array and an object keyed
/// by symbol.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SecuritiesPayload {
    List(Vec<SecurityRecord>),
    Wrapped {
        #[serde(alias = "data")]
        securities: Vec<SecurityRecord>,
    },
    Keyed(BTreeMap<String, SecurityRecord>),
}

impl SecuritiesPayload {
    fn into_records(self) -> Vec<(Option<String>, SecurityRecord)> {
        match self {
            Self::List(records) | Self::Wrapped { securities: records } => {
                records.into_iter().map(|record| (None, record)).collect()
            }
            Self::Keyed(map) => map
                .into_iter()
                .map(|(key, record)| (Some(key), record))
                .collect(),
        }
    }
}

fn normalize_security(
    key: Option<String>,
    record: SecurityRecord,
    language: Language,
) -> Option<RegistryEntry> {
    let raw_symbol = record.symbol.as_deref().or(key.as_deref())?;
    let symbol = match Symbol::parse(raw_symbol) {
        Ok(symbol) => symbol,
        Err(error) => {
            warn!(symbol = raw_symbol, %error, "skipping registry entry with unusable symbol");
            return None;
        }
    };

    let mut entry = RegistryEntry::new(symbol, language);
    entry.name_en = record.name_en;
    entry.name_th = record.name_th;
    match language {
        Language::En if entry.name_en.is_none() => entry.name_en = record.name.clone(),
        Language::Th if entry.name_th.is_none() => entry.name_th = record.name.clone(),
        _ => {}
    }
    entry.name = record.name;
    entry.market = record.market;
    entry.industry = record.industry;
    entry.sector = record.sector;
    entry.address = record.address;
    entry.website = record.web;
    entry.stock_type = record.stock_type;
    Some(entry)
}

#[derive(Debug, Deserialize)]
struct FinancialsRow {
    #[serde(alias = "fiscal")]
    fiscal_year: i32,
    #[serde(default)]
    quarter: Option<u8>,
    #[serde(flatten)]
    metrics: FinancialMetrics,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FinancialsPayload {
    List(Vec<FinancialsRow>),
    Wrapped { data: Vec<FinancialsRow> },
}

impl FinancialsPayload {
    fn into_rows(self) -> Vec<FinancialsRow> {
        match self {
            Self::List(rows) | Self::Wrapped { data: rows } => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::StaticHttpClient;
    use crate::MetricValue;

    const BASE: &str = "https://registry.test";

    fn adapter(http: StaticHttpClient) -> ThaiSecuritiesAdapter {
        ThaiSecuritiesAdapter::with_http_client(Arc::new(http), BASE)
    }

    #[tokio::test]
    async fn decodes_snapshot_keyed_by_symbol() {
        let http = StaticHttpClient::new().with_json(
            format!("{BASE}/thai_securities_all.json"),
            r#"{
                "PTT": {"name": "PTT Public Company Limited", "market": "SET",
                        "industry": "Resources", "sector": "Energy & Utilities",
                        "web": "www.pttplc.com"},
                "aot": {"symbol": "AOT", "name": "Airports of Thailand", "market": "SET"}
            }"#,
        );

        let entries = adapter(http)
            .snapshot(Language::En)
            .await
            .expect("snapshot decodes");

        assert_eq!(entries.len(), 2);
        let ptt = entries
            .iter()
            .find(|entry| entry.symbol.as_str() == "PTT")
            .expect("PTT present");
        assert_eq!(ptt.name_en.as_deref(), Some("PTT Public Company Limited"));
        assert_eq!(ptt.website.as_deref(), Some("www.pttplc.com"));
        assert!(entries.iter().any(|entry| entry.symbol.as_str() == "AOT"));
    }

    #[tokio::test]
    async fn decodes_thai_snapshot_as_array() {
        let http = StaticHttpClient::new().with_json(
            format!("{BASE}/thai_securities_all_th.json"),
            r#"[{"symbol": "ptt", "name": "บริษัท ปตท. จำกัด (มหาชน)", "market": "SET"}]"#,
        );

        let entries = adapter(http)
            .snapshot(Language::Th)
            .await
            .expect("snapshot decodes");

        assert_eq!(entries[0].symbol.as_str(), "PTT");
        assert_eq!(entries[0].language, Language::Th);
        assert_eq!(entries[0].name_th.as_deref(), Some("บริษัท ปตท. จำกัด (มหาชน)"));
        assert_eq!(entries[0].name_en, None);
    }

    #[tokio::test]
    async fn empty_snapshot_is_an_empty_result_error() {
        let http =
            StaticHttpClient::new().with_json(format!("{BASE}/thai_securities_all.json"), "[]");

        let error = adapter(http)
            .snapshot(Language::En)
            .await
            .expect_err("empty snapshot");
        assert_eq!(error.kind(), SourceErrorKind::EmptyResult);
    }

    #[tokio::test]
    async fn malformed_snapshot_is_a_schema_error() {
        let http = StaticHttpClient::new().with_json(
            format!("{BASE}/thai_securities_all.json"),
            r#"{"securities": "nope"}"#,
        );

        let error = adapter(http)
            .snapshot(Language::En)
            .await
            .expect_err("malformed snapshot");
        assert_eq!(error.kind(), SourceErrorKind::Schema);
    }

    #[tokio::test]
    async fn legacy_financials_keep_absent_markers() {
        let http = StaticHttpClient::new().with_json(
            format!("{BASE}/stocks/PTT/financials"),
            r#"{"data": [
                {"symbol": "PTT", "fiscal_year": 2023, "quarter": 1, "revenue": 100},
                {"symbol": "PTT", "fiscal_year": 2023, "quarter": null, "revenue": 420}
            ]}"#,
        );
        let adapter = adapter(http);

        let records = adapter.statements("PTT").await.expect("financials decode");

        assert_eq!(adapter.yearly_policy(), YearlyMarkerPolicy::ZeroOrAbsent);
        assert_eq!(adapter.key_space(), StatementKeySpace::Ticker);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].period_marker, Some(1));
        assert_eq!(records[1].period_marker, None);
        assert_eq!(records[1].metrics.revenue, Some(MetricValue::Number(420.0)));
        assert!(records.iter().all(|record| record.security_id == "PTT"));
    }

    #[tokio::test]
    async fn metadata_decodes_optional_fields() {
        let http = StaticHttpClient::new().with_json(
            format!("{BASE}/metadata.json"),
            r#"{"last_updated": "2025-06-01T00:00:00Z", "total_securities": 912}"#,
        );

        let metadata = adapter(http).metadata().await.expect("metadata decodes");
        assert_eq!(metadata.total_securities, Some(912));
        assert_eq!(metadata.sectors, None);
    }
}
