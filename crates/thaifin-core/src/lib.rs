//! # Thaifin Core
//!
//! Fundamental data for companies listed on the Stock Exchange of Thailand.
//!
//! ## Overview
//!
//! Two independent providers are reconciled into one per-symbol view:
//!
//! - **Thai Securities Data** publishes the securities registry (names,
//!   sector, industry, market, address, website) keyed by ticker
//! - **Finnomena** publishes per-period financial metrics keyed by an opaque
//!   UUID security id
//!
//! The [`IdentifierResolver`] joins the two key spaces, [`merge()`] combines a
//! registry entry with its statement records into a [`StockEntity`], and
//! [`PeriodTable`] reshapes those records into quarterly or yearly tables.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Thai Securities Data, Finnomena) |
//! | [`cache`] | Response cache collaborator and in-memory TTL store |
//! | [`config`] | Client configuration and `THAIFIN_*` overrides |
//! | [`data_source`] | Provider contracts and structured source errors |
//! | [`domain`] | Domain models (Symbol, RegistryEntry, FinancialPeriodRecord) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`localization`] | Thai column headers |
//! | [`matcher`] | Approximate name matching |
//! | [`merge`] | Merged stock entity and display fallback |
//! | [`resolver`] | Ticker to statement-key resolution |
//! | [`retry`] | Retrying transport decorator |
//! | [`search`] | Company-name search |
//! | [`source`] | Provider identifiers |
//! | [`stock`] | `ThaifinClient` and `Stock` facade |
//! | [`table`] | Quarterly and yearly period tables |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thaifin_core::{Language, ThaifinClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ThaifinClient::from_env();
//!
//!     let stock = client.stock("ptt", Language::En).await?;
//!     println!("{stock}: {} ({})", stock.company_name(), stock.sector());
//!
//!     for row in stock.quarter_table().rows() {
//!         println!("{} revenue={:?}", row.label(), row.get("revenue"));
//!     }
//!
//!     for found in client.search("airports", 3, Language::En).await? {
//!         println!("{}", found.symbol());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Facade operations return [`CoreError`]. Provider failures keep their
//! classification:
//!
//! ```rust
//! use thaifin_core::{CoreError, SourceErrorKind};
//!
//! fn describe(error: &CoreError) -> &'static str {
//!     match error.source_kind() {
//!         Some(SourceErrorKind::NotFound) => "unknown symbol",
//!         Some(SourceErrorKind::Schema) => "provider changed its format",
//!         Some(SourceErrorKind::EmptyResult) => "provider returned nothing",
//!         Some(_) => "provider unavailable",
//!         None => "invalid input",
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod localization;
pub mod matcher;
pub mod merge;
pub mod resolver;
pub mod retry;
pub mod search;
pub mod source;
pub mod stock;
pub mod table;

// Adapter implementations
pub use adapters::{FinnomenaAdapter, ThaiSecuritiesAdapter};

// Caching
pub use cache::{CacheStore, ResponseCache};

// Configuration
pub use config::ThaifinConfig;

// Provider contracts
pub use data_source::{
    ListingEntry, RegistrySource, SourceError, SourceErrorKind, SourceFuture, StatementSource,
};

// Domain models
pub use domain::{
    lenient_metric, FinancialMetrics, FinancialPeriodRecord, Language, MetricValue, PeriodKey,
    PeriodKind, RegistryEntry, RegistryMetadata, Symbol, UtcDateTime, YearlyMarkerPolicy,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

// Matching and search
pub use matcher::{NameMatch, NameMatcher, SimilarityMatcher};
pub use search::{rank_symbols, search_candidates, SearchCandidate};

// Merge, resolution, tables
pub use localization::{column_key, column_label};
pub use merge::{display_attr, merge, merge_at, StockEntity, FALLBACK_PLACEHOLDER};
pub use resolver::{join_listing, IdentifierResolver};
pub use table::{partition, PeriodRow, PeriodTable};

// Retry logic
pub use retry::{Backoff, RetryConfig, RetryingHttpClient};

// Source identifiers
pub use source::{parse_security_id, ProviderId, StatementKeySpace};

// Facade
pub use stock::{Stock, ThaifinClient};
