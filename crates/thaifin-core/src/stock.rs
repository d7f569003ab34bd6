//! Public facade: one client owning the providers, one `Stock` per symbol.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{FinnomenaAdapter, ThaiSecuritiesAdapter};
use crate::cache::{CacheStore, ResponseCache};
use crate::config::ThaifinConfig;
use crate::data_source::{RegistrySource, SourceError, StatementSource};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::matcher::{NameMatcher, SimilarityMatcher};
use crate::merge::{merge, StockEntity};
use crate::resolver::IdentifierResolver;
use crate::retry::RetryingHttpClient;
use crate::search::rank_symbols;
use crate::{
    CoreError, FinancialPeriodRecord, Language, PeriodTable, RegistryEntry, RegistryMetadata,
    UtcDateTime,
};

/// Entry point for loading stocks, searching names and listing symbols.
#[derive(Clone)]
pub struct ThaifinClient {
    resolver: IdentifierResolver,
    matcher: Arc<dyn NameMatcher>,
}

impl ThaifinClient {
    /// Client against the public providers, with retrying transport and a
    /// shared response cache.
    pub fn new(config: ThaifinConfig) -> Self {
        let http: Arc<dyn HttpClient> = Arc::new(RetryingHttpClient::new(
            ReqwestHttpClient::new(&config.user_agent),
            config.retry.clone(),
        ));
        let cache: Arc<dyn ResponseCache> = Arc::new(CacheStore::new(config.cache_ttl));
        Self::with_transport(http, cache, &config)
    }

    /// [`ThaifinClient::new`] with `THAIFIN_*` overrides applied.
    pub fn from_env() -> Self {
        Self::new(ThaifinConfig::from_env())
    }

    /// Default providers on an injected transport and cache.
    pub fn with_transport(
        http_client: Arc<dyn HttpClient>,
        cache: Arc<dyn ResponseCache>,
        config: &ThaifinConfig,
    ) -> Self {
        let registry =
            ThaiSecuritiesAdapter::new(Arc::clone(&http_client), Arc::clone(&cache), config);
        let statements = FinnomenaAdapter::new(http_client, cache, config);
        Self::with_sources(
            Arc::new(registry),
            Arc::new(statements),
            Arc::new(SimilarityMatcher::new(config.search_score_cutoff)),
        )
    }

    pub fn with_sources(
        registry: Arc<dyn RegistrySource>,
        statements: Arc<dyn StatementSource>,
        matcher: Arc<dyn NameMatcher>,
    ) -> Self {
        Self {
            resolver: IdentifierResolver::new(registry, statements),
            matcher,
        }
    }

    pub fn resolver(&self) -> &IdentifierResolver {
        &self.resolver
    }

    /// Load one symbol: registry lookup, statement fetch, merge.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] for a malformed symbol
    /// - `NotFound` when the symbol is unlisted or has no statement key
    /// - `Schema`, `EmptyResult` and transport errors from the providers
    pub async fn stock(&self, symbol: &str, language: Language) -> Result<Stock, CoreError> {
        let entry = self.resolver.resolve(symbol, language).await?;
        self.materialize(entry, language).await
    }

    /// Stocks whose English or Thai names best match `query`, best first.
    ///
    /// No match is an empty result, not an error.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        language: Language,
    ) -> Result<Vec<Stock>, CoreError> {
        let entries = self.resolver.entries(language).await?;
        let symbols = rank_symbols(&entries, query, limit, self.matcher.as_ref())?;

        let mut stocks = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let entry = entries
                .iter()
                .find(|entry| entry.symbol == symbol)
                .cloned()
                .ok_or_else(|| SourceError::internal(format!("ranked symbol {symbol} vanished")))?;
            stocks.push(self.materialize(entry, language).await?);
        }
        Ok(stocks)
    }

    /// Every registry symbol in provider order.
    pub async fn list_symbols(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.resolver.list_symbols().await?)
    }

    pub async fn metadata(&self) -> Result<RegistryMetadata, CoreError> {
        Ok(self.resolver.registry_source().metadata().await?)
    }

    async fn materialize(
        &self,
        entry: RegistryEntry,
        language: Language,
    ) -> Result<Stock, CoreError> {
        let statements = self.resolver.statement_source();
        let key = self.resolver.statement_key(&entry)?;
        let records = statements.statements(&key).await?;
        debug!(symbol = %entry.symbol, periods = records.len(), "statements fetched");

        let entity = merge(entry, records, statements.yearly_policy(), language);
        if entity.records().is_empty() {
            return Err(SourceError::empty_result(format!(
                "{} returned no statements for {}",
                statements.id(),
                entity.symbol()
            ))
            .into());
        }

        info!(symbol = entity.symbol(), %language, "stock loaded");
        Ok(Stock { entity })
    }
}

impl Default for ThaifinClient {
    fn default() -> Self {
        Self::new(ThaifinConfig::default())
    }
}

/// Read-only view of one listed company.
///
/// Every display attribute falls back to
/// [`FALLBACK_PLACEHOLDER`](crate::FALLBACK_PLACEHOLDER) when the provider
/// left it blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    entity: StockEntity,
}

impl Stock {
    pub fn from_entity(entity: StockEntity) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &StockEntity {
        &self.entity
    }

    pub fn symbol(&self) -> &str {
        self.entity.symbol()
    }

    pub fn company_name(&self) -> &str {
        self.entity.company_name()
    }

    pub fn thai_company_name(&self) -> &str {
        self.entity.thai_company_name()
    }

    pub fn english_company_name(&self) -> &str {
        self.entity.english_company_name()
    }

    pub fn industry(&self) -> &str {
        self.entity.industry()
    }

    pub fn sector(&self) -> &str {
        self.entity.sector()
    }

    pub fn market(&self) -> &str {
        self.entity.market()
    }

    pub fn address(&self) -> &str {
        self.entity.address()
    }

    pub fn website(&self) -> &str {
        self.entity.website()
    }

    pub fn language(&self) -> Language {
        self.entity.language()
    }

    pub fn updated(&self) -> UtcDateTime {
        self.entity.updated()
    }

    pub fn records(&self) -> &[FinancialPeriodRecord] {
        self.entity.records()
    }

    pub fn quarter_table(&self) -> PeriodTable {
        self.entity.quarter_table()
    }

    pub fn yearly_table(&self) -> PeriodTable {
        self.entity.yearly_table()
    }
}

impl Display for Stock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Stock \"{}\" - updated {}>",
            self.symbol(),
            self.updated().humanize_since(UtcDateTime::now())
        )
    }
}
