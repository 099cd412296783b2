//! Query matching against the FAQ table.
//!
//! Two stages, both lexical:
//!
//! 1. Keyword containment: the first topic (table order) whose keyword is a
//!    substring of the lowercased query answers directly.
//! 2. Fuzzy fallback: the query is split on whitespace and each token, in
//!    order, is compared against every keyword. The first token with any
//!    keyword at or above the cutoff produces a suggestion that the citizen
//!    must confirm.

use crate::error::{CivicError, Result};
use crate::faq::{FaqTable, Topic};
use crate::similarity::best_match;
use tracing::debug;

/// Similarity a token needs to be offered as a suggestion
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Result of matching one query
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    /// A keyword occurs verbatim in the query
    Direct(&'a Topic),
    /// A query token is close to a keyword
    Suggest {
        topic: &'a Topic,
        token: String,
        score: f64,
    },
    /// Nothing matched
    NoMatch,
}

impl MatchOutcome<'_> {
    /// Topic behind the outcome, if any
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            MatchOutcome::Direct(topic) => Some(topic),
            MatchOutcome::Suggest { topic, .. } => Some(topic),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// First topic whose keyword is contained in the query
pub fn find_keyword<'a>(query: &str, table: &'a FaqTable) -> Option<&'a Topic> {
    let lower = query.to_lowercase();
    table.iter().find(|t| lower.contains(t.keyword.as_str()))
}

/// Keyword most similar to a single word, with its score
pub fn closest_topic<'a>(
    word: &str,
    table: &'a FaqTable,
    cutoff: f64,
) -> Option<(&'a Topic, f64)> {
    let (keyword, score) = best_match(word, table.keywords(), cutoff)?;
    table.get(keyword).map(|topic| (topic, score))
}

/// Run both matching stages over a query
pub fn match_query<'a>(query: &str, table: &'a FaqTable, cutoff: f64) -> MatchOutcome<'a> {
    if let Some(topic) = find_keyword(query, table) {
        debug!(keyword = %topic.keyword, "keyword hit");
        return MatchOutcome::Direct(topic);
    }

    let lower = query.to_lowercase();
    for token in lower.split_whitespace() {
        if let Some((topic, score)) = closest_topic(token, table, cutoff) {
            debug!(token, keyword = %topic.keyword, score, "fuzzy suggestion");
            return MatchOutcome::Suggest {
                topic,
                token: token.to_string(),
                score,
            };
        }
    }

    debug!("no match");
    MatchOutcome::NoMatch
}

/// A table paired with a validated similarity cutoff
#[derive(Debug, Clone)]
pub struct Matcher {
    table: FaqTable,
    cutoff: f64,
}

impl Matcher {
    pub fn new(table: FaqTable, cutoff: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(CivicError::InvalidCutoff(cutoff));
        }
        Ok(Self { table, cutoff })
    }

    pub fn table(&self) -> &FaqTable {
        &self.table
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn match_query(&self, query: &str) -> MatchOutcome<'_> {
        match_query(query, &self.table, self.cutoff)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            table: FaqTable::builtin(),
            cutoff: DEFAULT_CUTOFF,
        }
    }
}
