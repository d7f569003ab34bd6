//! Quarterly and yearly period tables built from statement records.

use serde::Serialize;
use tracing::warn;

use crate::localization::{column_key, column_label};
use crate::{
    FinancialMetrics, FinancialPeriodRecord, Language, MetricValue, PeriodKey, PeriodKind,
    YearlyMarkerPolicy,
};

/// One period row. Identifier, fiscal-year and marker columns are folded into
/// [`PeriodRow::key`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub key: PeriodKey,
    /// Cells in [`FinancialMetrics::COLUMNS`] order.
    pub values: Vec<Option<MetricValue>>,
}

impl PeriodRow {
    fn from_metrics(key: PeriodKey, metrics: &FinancialMetrics) -> Self {
        Self {
            key,
            values: metrics.values().into_iter().map(|value| value.cloned()).collect(),
        }
    }

    pub fn label(&self) -> String {
        self.key.label()
    }

    /// Cell for a column given by metric key or localized header.
    pub fn get(&self, column: &str) -> Option<&MetricValue> {
        let index = column_index(column)?;
        self.values.get(index).and_then(Option::as_ref)
    }
}

/// Chronologically ordered table keyed by period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTable {
    kind: PeriodKind,
    /// Headers in the table language, [`FinancialMetrics::COLUMNS`] order.
    columns: Vec<String>,
    rows: Vec<PeriodRow>,
}

impl PeriodTable {
    /// Rows that are not yearly under `policy`, keyed `"{year}Q{marker}"`.
    pub fn quarterly(
        records: &[FinancialPeriodRecord],
        policy: YearlyMarkerPolicy,
        language: Language,
    ) -> Self {
        let (quarterly, _) = partition(records, policy);
        Self::build(PeriodKind::Quarterly, quarterly, language, |record| {
            PeriodKey::Quarter {
                year: record.fiscal_year,
                quarter: record.period_marker.unwrap_or(0),
            }
        })
    }

    /// Yearly rows under `policy`, keyed by fiscal year.
    pub fn yearly(
        records: &[FinancialPeriodRecord],
        policy: YearlyMarkerPolicy,
        language: Language,
    ) -> Self {
        let (_, yearly) = partition(records, policy);
        Self::build(PeriodKind::Yearly, yearly, language, |record| PeriodKey::Year {
            year: record.fiscal_year,
        })
    }

    fn build(
        kind: PeriodKind,
        records: Vec<&FinancialPeriodRecord>,
        language: Language,
        key_of: impl Fn(&FinancialPeriodRecord) -> PeriodKey,
    ) -> Self {
        // Rows are identified by the record's own (year, marker) tuple, so
        // distinct records that share a row key all survive.
        let mut rows: Vec<(i32, Option<u8>, PeriodRow)> = Vec::with_capacity(records.len());
        for record in records {
            let row = PeriodRow::from_metrics(key_of(record), &record.metrics);
            let existing = rows.iter_mut().find(|(year, marker, _)| {
                *year == record.fiscal_year && *marker == record.period_marker
            });
            match existing {
                Some((_, _, slot)) => {
                    warn!(
                        period = %row.key,
                        security_id = %record.security_id,
                        "duplicate period, keeping the later record"
                    );
                    *slot = row;
                }
                None => rows.push((record.fiscal_year, record.period_marker, row)),
            }
        }
        rows.sort_by_key(|(_, _, row)| row.key);

        Self {
            kind,
            columns: FinancialMetrics::COLUMNS
                .iter()
                .map(|column| column_label(column, language).to_owned())
                .collect(),
            rows: rows.into_iter().map(|(_, _, row)| row).collect(),
        }
    }

    pub const fn kind(&self) -> PeriodKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    /// Row labels in table order.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(PeriodRow::label).collect()
    }

    /// Row for `label`, e.g. `"2023Q1"` or `"2023"`.
    pub fn row(&self, label: &str) -> Option<&PeriodRow> {
        let label = label.trim();
        self.rows.iter().find(|row| row.key.label() == label)
    }

    /// `(period, cell)` pairs for one column, by metric key or localized header.
    pub fn column(&self, column: &str) -> Option<Vec<(PeriodKey, Option<&MetricValue>)>> {
        let index = column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row.key, row.values.get(index).and_then(Option::as_ref)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split `records` into `(quarterly, yearly)` under `policy`. Every record
/// lands in exactly one side; input order is kept within each side.
pub fn partition(
    records: &[FinancialPeriodRecord],
    policy: YearlyMarkerPolicy,
) -> (Vec<&FinancialPeriodRecord>, Vec<&FinancialPeriodRecord>) {
    let (yearly, quarterly): (Vec<_>, Vec<_>) = records
        .iter()
        .partition(|record| policy.is_yearly(record.period_marker));
    (quarterly, yearly)
}

fn column_index(column: &str) -> Option<usize> {
    let key = column_key(column)?;
    FinancialMetrics::COLUMNS.iter().position(|candidate| *candidate == key)
}
