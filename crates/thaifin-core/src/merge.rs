//! Merged per-symbol view of registry attributes and statement records.

use tracing::warn;

use crate::{
    FinancialPeriodRecord, Language, PeriodTable, RegistryEntry, UtcDateTime, YearlyMarkerPolicy,
};

/// Substituted for every absent or blank display attribute.
pub const FALLBACK_PLACEHOLDER: &str = "-";

/// `value` when it holds non-blank text, `default` otherwise.
pub fn display_attr<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => default,
    }
}

/// One registry entry plus the statement records fetched for it.
///
/// Immutable after construction; refreshing means merging again.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntity {
    entry: RegistryEntry,
    records: Vec<FinancialPeriodRecord>,
    yearly_policy: YearlyMarkerPolicy,
    language: Language,
    updated: UtcDateTime,
}

/// Combine `entry` and `records` into a [`StockEntity`] stamped with the
/// current time.
///
/// Record order is preserved. Records keyed under a different statement
/// identifier than the entry's are dropped.
pub fn merge(
    entry: RegistryEntry,
    records: Vec<FinancialPeriodRecord>,
    yearly_policy: YearlyMarkerPolicy,
    language: Language,
) -> StockEntity {
    merge_at(entry, records, yearly_policy, language, UtcDateTime::now())
}

/// [`merge`] with an explicit refresh timestamp.
pub fn merge_at(
    entry: RegistryEntry,
    records: Vec<FinancialPeriodRecord>,
    yearly_policy: YearlyMarkerPolicy,
    language: Language,
    updated: UtcDateTime,
) -> StockEntity {
    let records = match entry.statement_id.as_deref() {
        Some(statement_id) => {
            let total = records.len();
            let kept: Vec<_> = records
                .into_iter()
                .filter(|record| record.security_id.eq_ignore_ascii_case(statement_id))
                .collect();
            if kept.len() != total {
                warn!(
                    symbol = %entry.symbol,
                    dropped = total - kept.len(),
                    "dropping records keyed under another security"
                );
            }
            kept
        }
        None => records,
    };

    StockEntity {
        entry,
        records,
        yearly_policy,
        language,
        updated,
    }
}

impl StockEntity {
    pub fn entry(&self) -> &RegistryEntry {
        &self.entry
    }

    pub fn records(&self) -> &[FinancialPeriodRecord] {
        &self.records
    }

    pub const fn yearly_policy(&self) -> YearlyMarkerPolicy {
        self.yearly_policy
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub const fn updated(&self) -> UtcDateTime {
        self.updated
    }

    pub fn symbol(&self) -> &str {
        self.entry.symbol.as_str()
    }

    /// Company name in the entity's language.
    pub fn company_name(&self) -> &str {
        display_attr(self.entry.name_in(self.language), FALLBACK_PLACEHOLDER)
    }

    pub fn thai_company_name(&self) -> &str {
        display_attr(self.entry.name_in(Language::Th), FALLBACK_PLACEHOLDER)
    }

    pub fn english_company_name(&self) -> &str {
        display_attr(self.entry.name_in(Language::En), FALLBACK_PLACEHOLDER)
    }

    pub fn industry(&self) -> &str {
        display_attr(self.entry.industry.as_deref(), FALLBACK_PLACEHOLDER)
    }

    pub fn sector(&self) -> &str {
        display_attr(self.entry.sector.as_deref(), FALLBACK_PLACEHOLDER)
    }

    pub fn market(&self) -> &str {
        display_attr(self.entry.market.as_deref(), FALLBACK_PLACEHOLDER)
    }

    pub fn address(&self) -> &str {
        display_attr(self.entry.address.as_deref(), FALLBACK_PLACEHOLDER)
    }

    pub fn website(&self) -> &str {
        display_attr(self.entry.website.as_deref(), FALLBACK_PLACEHOLDER)
    }

    /// Quarterly rows, recomputed on every call.
    pub fn quarter_table(&self) -> PeriodTable {
        PeriodTable::quarterly(&self.records, self.yearly_policy, self.language)
    }

    /// Yearly rows, recomputed on every call.
    pub fn yearly_table(&self) -> PeriodTable {
        PeriodTable::yearly(&self.records, self.yearly_policy, self.language)
    }
}
