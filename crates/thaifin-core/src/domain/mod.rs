//! # Domain Models
//!
//! Canonical domain types for Thai listed-company data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase SET/mai ticker |
//! | [`Language`] | Presentation language (`en`, `th`) |
//! | [`RegistryEntry`] | Listing metadata from the securities registry |
//! | [`RegistryMetadata`] | Registry snapshot metadata |
//! | [`FinancialPeriodRecord`] | One fiscal period from the statement provider |
//! | [`FinancialMetrics`] | Optional per-period metric cells |
//! | [`YearlyMarkerPolicy`] | Provider convention for yearly rows |
//! | [`PeriodKey`] | Chronological row key of a period table |
//! | [`UtcDateTime`] | UTC timestamp |

mod language;
mod period;
mod registry;
mod statement;
mod symbol;
mod timestamp;

pub use language::Language;
pub use period::{PeriodKey, PeriodKind, YearlyMarkerPolicy};
pub use registry::{RegistryEntry, RegistryMetadata};
pub use statement::{lenient_metric, FinancialMetrics, FinancialPeriodRecord, MetricValue};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
