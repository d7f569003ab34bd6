//! Provider contracts and the structured error they report.
//!
//! | Contract | Provider | Operations |
//! |----------|----------|------------|
//! | [`RegistrySource`] | securities registry | snapshot, metadata |
//! | [`StatementSource`] | financial statements | listing, statements |
//!
//! Both contracts return boxed futures so adapters can be stored as
//! `Arc<dyn ...>` and swapped for deterministic fakes in tests.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::source::{ProviderId, StatementKeySpace};
use crate::{FinancialPeriodRecord, Language, RegistryEntry, RegistryMetadata, YearlyMarkerPolicy};

/// Boxed future returned by provider contracts.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    /// Symbol absent from the registry, or no statement key can be derived.
    NotFound,
    /// Provider response failed structural validation.
    Schema,
    /// A fetch succeeded but returned zero records where one was required.
    EmptyResult,
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured source error propagated unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn schema(provider: ProviderId, detail: impl Display) -> Self {
        Self {
            kind: SourceErrorKind::Schema,
            message: format!("{provider} response failed validation: {detail}"),
            retryable: false,
        }
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::EmptyResult,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Schema => "source.schema",
            SourceErrorKind::EmptyResult => "source.empty_result",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// One security as listed by the statement provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Ticker symbol, uppercase.
    pub symbol: String,
    pub name_en: Option<String>,
    pub name_th: Option<String>,
    /// Key the provider's statement endpoint expects for this security.
    pub statement_id: String,
    pub exchange: Option<String>,
}

/// Securities-registry contract.
pub trait RegistrySource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Full registry dump in `language`, in provider order.
    ///
    /// # Errors
    ///
    /// - [`SourceErrorKind::Schema`] when the dump does not decode
    /// - [`SourceErrorKind::EmptyResult`] when the dump lists no security
    fn snapshot<'a>(&'a self, language: Language) -> SourceFuture<'a, Vec<RegistryEntry>>;

    /// Snapshot metadata (last update, totals).
    fn metadata<'a>(&'a self) -> SourceFuture<'a, RegistryMetadata>;
}

/// Financial-statement contract.
pub trait StatementSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Key space [`StatementSource::statements`] expects.
    fn key_space(&self) -> StatementKeySpace;

    /// Sentinel convention of this provider's yearly rows.
    fn yearly_policy(&self) -> YearlyMarkerPolicy;

    /// Provider listing used to map tickers onto statement keys. Providers
    /// keyed by ticker may return an empty listing.
    fn listing<'a>(&'a self) -> SourceFuture<'a, Vec<ListingEntry>>;

    /// All available periods for one statement key.
    ///
    /// # Errors
    ///
    /// - [`SourceErrorKind::Schema`] when the response does not decode
    /// - [`SourceErrorKind::EmptyResult`] when no period is returned
    fn statements<'a>(&'a self, key: &'a str) -> SourceFuture<'a, Vec<FinancialPeriodRecord>>;
}
