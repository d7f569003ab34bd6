use std::fmt::{self, Display, Formatter};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// A single metric cell. Providers send numbers, numeric strings or free text
/// for the same field, so numeric strings are folded into `Number`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    fn from_text(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return None;
        }
        match trimmed.replace(',', "").parse::<f64>() {
            Ok(value) if value.is_finite() => Some(Self::Number(value)),
            _ => Some(Self::Text(trimmed.to_owned())),
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match lenient_metric(deserializer)? {
            Some(value) => Ok(value),
            None => Err(de::Error::custom("metric value is empty")),
        }
    }
}

struct MetricVisitor;

impl<'de> Visitor<'de> for MetricVisitor {
    type Value = Option<MetricValue>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string or null")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(MetricValue::Text(value.to_string())))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(MetricValue::Number(value as f64)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(MetricValue::Number(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.is_finite().then_some(MetricValue::Number(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(MetricValue::from_text(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MetricVisitor)
    }
}

/// Deserialize an optional metric, treating null, empty strings and `"-"` as
/// absent.
pub fn lenient_metric<'de, D>(deserializer: D) -> Result<Option<MetricValue>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(MetricVisitor)
}

macro_rules! financial_metrics {
    ($($field:ident),+ $(,)?) => {
        /// Per-period financial metrics. Every field is optional because
        /// providers omit whatever a period did not disclose.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct FinancialMetrics {
            $(
                #[serde(default, deserialize_with = "lenient_metric")]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<MetricValue>,
            )+
        }

        impl FinancialMetrics {
            /// Column keys in declaration order.
            pub const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),+];

            /// Cells in [`Self::COLUMNS`] order.
            pub fn values(&self) -> Vec<Option<&MetricValue>> {
                vec![$(self.$field.as_ref()),+]
            }

            pub fn get(&self, column: &str) -> Option<&MetricValue> {
                match column {
                    $(stringify!($field) => self.$field.as_ref(),)+
                    _ => None,
                }
            }
        }
    };
}

financial_metrics!(
    cash,
    da,
    debt_to_equity,
    equity,
    earning_per_share,
    earning_per_share_yoy,
    earning_per_share_qoq,
    gpm,
    gross_profit,
    net_profit,
    net_profit_yoy,
    net_profit_qoq,
    npm,
    revenue,
    revenue_yoy,
    revenue_qoq,
    roa,
    roe,
    sga,
    sga_per_revenue,
    total_debt,
    dividend_yield,
    book_value_per_share,
    close,
    mkt_cap,
    price_earning_ratio,
    price_book_value,
    ev_per_ebit_da,
    ebit_dattm,
    paid_up_capital,
    cash_cycle,
    operating_activities,
    investing_activities,
    financing_activities,
    asset,
    end_of_year_date,
);

/// One (identifier, fiscal year, period marker) row from a statement provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriodRecord {
    /// Statement-provider key this record was fetched under.
    pub security_id: String,
    pub fiscal_year: i32,
    /// `1..=4` for quarters; the yearly sentinel depends on the provider.
    pub period_marker: Option<u8>,
    pub metrics: FinancialMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accept_numbers_numeric_strings_and_text() {
        let metrics: FinancialMetrics = serde_json::from_str(
            r#"{
                "revenue": "1,234.5",
                "net_profit": 88,
                "roe": null,
                "roa": "",
                "npm": "-",
                "end_of_year_date": "2023-12-31",
                "unknown_field": 1
            }"#,
        )
        .expect("metrics should decode");

        assert_eq!(metrics.revenue, Some(MetricValue::Number(1234.5)));
        assert_eq!(metrics.net_profit, Some(MetricValue::Number(88.0)));
        assert_eq!(metrics.roe, None);
        assert_eq!(metrics.roa, None);
        assert_eq!(metrics.npm, None);
        assert_eq!(
            metrics.end_of_year_date,
            Some(MetricValue::Text(String::from("2023-12-31")))
        );
    }

    #[test]
    fn columns_and_values_line_up() {
        let metrics = FinancialMetrics {
            revenue: Some(MetricValue::Number(10.0)),
            ..FinancialMetrics::default()
        };

        let values = metrics.values();
        assert_eq!(values.len(), FinancialMetrics::COLUMNS.len());

        let index = FinancialMetrics::COLUMNS
            .iter()
            .position(|column| *column == "revenue")
            .expect("revenue column");
        assert_eq!(values[index], Some(&MetricValue::Number(10.0)));
        assert_eq!(metrics.get("revenue"), Some(&MetricValue::Number(10.0)));
        assert_eq!(metrics.get("fiscal"), None);
    }
}
