use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    ThaiSecurities,
    Finnomena,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::ThaiSecurities, Self::Finnomena];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThaiSecurities => "thai_securities",
            Self::Finnomena => "finnomena",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "thai_securities" | "thai-securities" => Ok(Self::ThaiSecurities),
            "finnomena" => Ok(Self::Finnomena),
            other => Err(format!(
                "invalid provider '{other}', expected one of thai_securities, finnomena"
            )),
        }
    }
}

/// Key space a statement provider indexes its records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKeySpace {
    /// The ticker symbol itself.
    Ticker,
    /// An opaque UUID security identifier attached by the resolver.
    SecurityId,
}

/// Validate an opaque security identifier and return its canonical form.
pub fn parse_security_id(raw: &str) -> Result<String, ValidationError> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| ValidationError::InvalidSecurityId {
            value: raw.to_owned(),
        })
}
