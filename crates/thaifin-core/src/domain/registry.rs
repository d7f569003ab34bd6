use serde::{Deserialize, Serialize};

use crate::{Language, Symbol};

/// One security as listed by the registry provider, joined with the
/// statement provider's identifier when one is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub symbol: Symbol,
    /// Language of the snapshot this entry came from.
    pub language: Language,
    /// Name in the snapshot language.
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub name_th: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub stock_type: Option<String>,
    /// Key of this security in the statement provider's key space.
    pub statement_id: Option<String>,
}

impl RegistryEntry {
    pub fn new(symbol: Symbol, language: Language) -> Self {
        Self {
            symbol,
            language,
            name: None,
            name_en: None,
            name_th: None,
            sector: None,
            industry: None,
            market: None,
            address: None,
            website: None,
            stock_type: None,
            statement_id: None,
        }
    }

    /// Company name in `language`, falling back to the snapshot-language name
    /// when it matches.
    pub fn name_in(&self, language: Language) -> Option<&str> {
        let localized = match language {
            Language::En => self.name_en.as_deref(),
            Language::Th => self.name_th.as_deref(),
        };
        let snapshot = (self.language == language)
            .then_some(self.name.as_deref())
            .flatten();

        non_blank(localized).or_else(|| non_blank(snapshot))
    }

    /// Every distinct non-blank display name this entry is known by, in
    /// snapshot, English, Thai order.
    pub fn display_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(3);
        for candidate in [
            self.name.as_deref(),
            self.name_en.as_deref(),
            self.name_th.as_deref(),
        ] {
            if let Some(name) = non_blank(candidate) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Snapshot metadata published next to the registry dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_securities: Option<u64>,
    #[serde(default)]
    pub markets: Option<serde_json::Value>,
    #[serde(default)]
    pub sectors: Option<serde_json::Value>,
}
