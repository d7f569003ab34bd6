use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Which period-marker value a statement provider uses for "yearly aggregate".
///
/// The two conventions in use are not interchangeable: a `0` marker is a
/// quarterly row under [`YearlyMarkerPolicy::Nine`] and a `9` marker is a
/// quarterly row under [`YearlyMarkerPolicy::ZeroOrAbsent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearlyMarkerPolicy {
    /// Yearly rows carry marker `9` exactly.
    Nine,
    /// Yearly rows carry marker `0` or no marker at all.
    ZeroOrAbsent,
}

impl YearlyMarkerPolicy {
    pub const NINE_SENTINEL: u8 = 9;

    pub const fn is_yearly(self, marker: Option<u8>) -> bool {
        match self {
            Self::Nine => matches!(marker, Some(Self::NINE_SENTINEL)),
            Self::ZeroOrAbsent => matches!(marker, None | Some(0)),
        }
    }
}

/// Granularity of a [`crate::PeriodTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Quarterly,
    Yearly,
}

/// Row key of a period table, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodKey {
    Quarter { year: i32, quarter: u8 },
    Year { year: i32 },
}

impl PeriodKey {
    pub const fn year(self) -> i32 {
        match self {
            Self::Quarter { year, .. } | Self::Year { year } => year,
        }
    }

    /// `"{year}Q{quarter}"` or `"{year}"`.
    pub fn label(self) -> String {
        self.to_string()
    }

    /// First calendar day of the period, when the key names a real period.
    pub fn start_date(self) -> Option<Date> {
        let month = match self {
            Self::Year { .. } => Month::January,
            Self::Quarter { quarter, .. } => match quarter {
                1 => Month::January,
                2 => Month::April,
                3 => Month::July,
                4 => Month::October,
                _ => return None,
            },
        };
        Date::from_calendar_date(self.year(), month, 1).ok()
    }

    fn sort_tuple(self) -> (i32, u8) {
        match self {
            Self::Quarter { year, quarter } => (year, quarter),
            Self::Year { year } => (year, 0),
        }
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_tuple().cmp(&other.sort_tuple())
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quarter { year, quarter } => write!(f, "{year}Q{quarter}"),
            Self::Year { year } => write!(f, "{year}"),
        }
    }
}
