//! Ticker to statement-key resolution across the two providers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::data_source::{ListingEntry, RegistrySource, SourceError, StatementSource};
use crate::source::{parse_security_id, StatementKeySpace};
use crate::{CoreError, Language, RegistryEntry, Symbol};

/// Joins the registry snapshot with the statement provider's listing.
#[derive(Clone)]
pub struct IdentifierResolver {
    registry: Arc<dyn RegistrySource>,
    statements: Arc<dyn StatementSource>,
}

impl IdentifierResolver {
    pub fn new(registry: Arc<dyn RegistrySource>, statements: Arc<dyn StatementSource>) -> Self {
        Self {
            registry,
            statements,
        }
    }

    /// Every registry entry in `language`, joined with its statement key.
    pub async fn entries(&self, language: Language) -> Result<Vec<RegistryEntry>, SourceError> {
        let snapshot = self.registry.snapshot(language).await?;
        let key_space = self.statements.key_space();
        let listing = match key_space {
            StatementKeySpace::SecurityId => self.statements.listing().await?,
            StatementKeySpace::Ticker => Vec::new(),
        };

        Ok(join_listing(snapshot, listing, key_space))
    }

    /// Registry entry for `symbol`, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] when `symbol` is not a well-formed ticker
    /// - `NotFound` when the registry has no such symbol
    pub async fn resolve(
        &self,
        symbol: &str,
        language: Language,
    ) -> Result<RegistryEntry, CoreError> {
        let symbol = Symbol::parse(symbol)?;
        let entry = self
            .entries(language)
            .await?
            .into_iter()
            .find(|entry| entry.symbol == symbol)
            .ok_or_else(|| {
                SourceError::not_found(format!("symbol {symbol} is not listed in the registry"))
            })?;

        debug!(%symbol, statement_id = ?entry.statement_id, "symbol resolved");
        Ok(entry)
    }

    /// Key under which the statement provider indexes `entry`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the entry carries no usable key for the provider's key
    /// space.
    pub fn statement_key(&self, entry: &RegistryEntry) -> Result<String, SourceError> {
        let missing = || {
            SourceError::not_found(format!(
                "{} has no {} statement identifier",
                entry.symbol,
                self.statements.id()
            ))
        };
        let raw = entry.statement_id.as_deref().ok_or_else(missing)?;

        match self.statements.key_space() {
            StatementKeySpace::Ticker => Ok(raw.to_owned()),
            StatementKeySpace::SecurityId => parse_security_id(raw).map_err(|_| missing()),
        }
    }

    /// All registry symbols in provider order.
    pub async fn list_symbols(&self) -> Result<Vec<String>, SourceError> {
        Ok(self
            .registry
            .snapshot(Language::En)
            .await?
            .into_iter()
            .map(|entry| entry.symbol.as_str().to_owned())
            .collect())
    }

    pub fn statement_source(&self) -> &Arc<dyn StatementSource> {
        &self.statements
    }

    pub fn registry_source(&self) -> &Arc<dyn RegistrySource> {
        &self.registry
    }
}

/// Attach statement keys and fill missing names from the provider listing.
/// Ticker-keyed providers key every entry by its own symbol.
pub fn join_listing(
    entries: Vec<RegistryEntry>,
    listing: Vec<ListingEntry>,
    key_space: StatementKeySpace,
) -> Vec<RegistryEntry> {
    let mut by_symbol: HashMap<String, ListingEntry> = HashMap::with_capacity(listing.len());
    for item in listing {
        by_symbol.entry(item.symbol.clone()).or_insert(item);
    }

    entries
        .into_iter()
        .map(|mut entry| {
            match key_space {
                StatementKeySpace::Ticker => {
                    entry.statement_id = Some(entry.symbol.as_str().to_owned());
                }
                StatementKeySpace::SecurityId => {
                    if let Some(item) = by_symbol.get(entry.symbol.as_str()) {
                        entry.statement_id = Some(item.statement_id.clone());
                        if entry.name_en.is_none() {
                            entry.name_en = item.name_en.clone();
                        }
                        if entry.name_th.is_none() {
                            entry.name_th = item.name_th.clone();
                        }
                    }
                }
            }
            entry
        })
        .collect()
}
