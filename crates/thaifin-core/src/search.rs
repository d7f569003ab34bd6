//! Company-name search over registry entries.

use std::collections::HashSet;

use tracing::debug;

use crate::matcher::NameMatcher;
use crate::{RegistryEntry, Symbol, ValidationError};

/// Display name paired with the index of the entry that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate<'a> {
    pub name: &'a str,
    pub owner: usize,
}

/// Every English and Thai display name of every entry.
pub fn search_candidates(entries: &[RegistryEntry]) -> Vec<SearchCandidate<'_>> {
    entries
        .iter()
        .enumerate()
        .flat_map(|(owner, entry)| {
            entry
                .display_names()
                .into_iter()
                .map(move |name| SearchCandidate { name, owner })
        })
        .collect()
}

/// Symbols whose names best match `query`, best first, at most `limit`.
///
/// An entry matched through both its English and Thai names is reported once,
/// at the position of its better match.
pub fn rank_symbols(
    entries: &[RegistryEntry],
    query: &str,
    limit: usize,
    matcher: &dyn NameMatcher,
) -> Result<Vec<Symbol>, ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if limit == 0 {
        return Err(ValidationError::ZeroLimit);
    }

    let candidates = search_candidates(entries);
    let names: Vec<&str> = candidates.iter().map(|candidate| candidate.name).collect();
    let matches = matcher.top_matches(query, &names, names.len());

    let mut seen = HashSet::new();
    let symbols: Vec<Symbol> = matches
        .into_iter()
        .filter_map(|found| candidates.get(found.index))
        .filter(|candidate| seen.insert(candidate.owner))
        .take(limit)
        .map(|candidate| entries[candidate.owner].symbol.clone())
        .collect();

    debug!(query, matched = symbols.len(), "search ranked");
    Ok(symbols)
}
