//! Approximate name matching used by company search.

use serde::{Deserialize, Serialize};

/// One ranked candidate, by position in the candidate slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMatch {
    pub index: usize,
    /// Similarity on a 0..=100 scale.
    pub score: u8,
}

/// Ranks candidate names against a query.
pub trait NameMatcher: Send + Sync {
    /// At most `limit` matches, best first. Equal scores keep candidate order.
    fn top_matches(&self, query: &str, candidates: &[&str], limit: usize) -> Vec<NameMatch>;
}

/// Normalized Levenshtein similarity with partial-window scoring.
///
/// A candidate scores the better of its whole-string ratio and 0.9 times the
/// best ratio of any query-length window, so a short query such as a ticker
/// still ranks the long legal names that contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityMatcher {
    cutoff: u8,
}

impl SimilarityMatcher {
    pub const PARTIAL_WEIGHT: f64 = 0.9;

    pub fn new(cutoff: u8) -> Self {
        Self {
            cutoff: cutoff.min(100),
        }
    }

    pub const fn cutoff(&self) -> u8 {
        self.cutoff
    }

    pub fn score(&self, query: &str, candidate: &str) -> u8 {
        let query = query.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        if query.is_empty() || candidate.is_empty() {
            return 0;
        }

        let full = strsim::normalized_levenshtein(&query, &candidate);
        let partial = partial_ratio(&query, &candidate) * Self::PARTIAL_WEIGHT;
        (full.max(partial) * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(60)
    }
}

impl NameMatcher for SimilarityMatcher {
    fn top_matches(&self, query: &str, candidates: &[&str], limit: usize) -> Vec<NameMatch> {
        if limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<NameMatch> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| NameMatch {
                index,
                score: self.score(query, candidate),
            })
            .filter(|found| found.score >= self.cutoff)
            .collect();

        matches.sort_by(|left, right| right.score.cmp(&left.score));
        matches.truncate(limit);
        matches
    }
}

/// Best normalized Levenshtein ratio between the shorter string and any
/// equally long window of the longer one.
fn partial_ratio(left: &str, right: &str) -> f64 {
    let (short, long) = if left.chars().count() <= right.chars().count() {
        (left, right)
    } else {
        (right, left)
    };
    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();
    if width == long_chars.len() {
        return strsim::normalized_levenshtein(short, long);
    }

    long_chars
        .windows(width)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_levenshtein(short, &window)
        })
        .fold(0.0, f64::max)
}
