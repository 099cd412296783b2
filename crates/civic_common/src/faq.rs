//! FAQ topic table.
//!
//! Ordered keyword -> answer mapping. Order is significant: the keyword scan
//! returns the first topic, in table order, whose keyword occurs in the query.
//! The table is immutable once built.

use crate::error::{CivicError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Built-in municipal topics, in scan order
const BUILTIN_TOPICS: &[(&str, &str)] = &[
    (
        "garbage",
        "Garbage collection happens every Monday and Thursday. Contact your local municipal office for complaints.",
    ),
    (
        "water",
        "Water supply is available daily. For issues, contact the Jal Board helpline at 1916.",
    ),
    (
        "electricity",
        "Electricity is available 24/7. For outages, contact the local electricity board helpline.",
    ),
    (
        "parking",
        "Parking permits are required for certain areas. Apply via the local municipal website.",
    ),
    (
        "library",
        "Public libraries are open from 9 AM to 6 PM, Monday to Saturday. Closed on Sundays.",
    ),
    (
        "buses",
        "City buses operate every 15 minutes from 6 AM to 10 PM on weekdays.",
    ),
    (
        "recycling",
        "Recyclable waste is collected every Tuesday. Please separate wet and dry waste.",
    ),
    (
        "fires",
        "In case of fire emergencies, dial 101. The fire department operates 24/7.",
    ),
    (
        "healthcare",
        "Government health centers are open from 8 AM to 8 PM. For emergencies, visit the nearest hospital.",
    ),
    (
        "schools",
        "Government schools operate from 8 AM to 2 PM. Check the local education board for holiday schedules.",
    ),
    (
        "wifi",
        "Free Wi-Fi is available in select public parks and metro stations.",
    ),
    (
        "police",
        "For non-emergencies, call the local police station. For emergencies, dial 100.",
    ),
    (
        "events",
        "Visit the city municipal website for details on upcoming local festivals and public events.",
    ),
];

/// A single FAQ entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Lowercase keyword searched for in queries
    pub keyword: String,
    /// Canned answer
    pub answer: String,
}

impl Topic {
    pub fn new(keyword: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            answer: answer.into(),
        }
    }
}

/// On-disk layout of a replacement table
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    topic: Vec<Topic>,
}

/// Ordered, validated topic table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqTable {
    topics: Vec<Topic>,
}

impl FaqTable {
    /// The default municipal services table
    pub fn builtin() -> Self {
        Self {
            topics: BUILTIN_TOPICS
                .iter()
                .map(|(keyword, answer)| Topic::new(*keyword, *answer))
                .collect(),
        }
    }

    /// Build a table from topics, lowercasing keywords.
    ///
    /// Rejects an empty table, blank keywords or answers, and keywords that
    /// collide after lowercasing.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self> {
        if topics.is_empty() {
            return Err(CivicError::InvalidTable("table has no topics".to_string()));
        }

        let mut seen = BTreeSet::new();
        let mut normalized = Vec::with_capacity(topics.len());

        for topic in topics {
            let keyword = topic.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(CivicError::InvalidTable("empty keyword".to_string()));
            }
            if topic.answer.trim().is_empty() {
                return Err(CivicError::InvalidTable(format!(
                    "topic '{}' has an empty answer",
                    keyword
                )));
            }
            if !seen.insert(keyword.clone()) {
                return Err(CivicError::InvalidTable(format!(
                    "duplicate keyword '{}'",
                    keyword
                )));
            }
            normalized.push(Topic {
                keyword,
                answer: topic.answer,
            });
        }

        Ok(Self { topics: normalized })
    }

    /// Load a table from a TOML file of `[[topic]]` entries
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CivicError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TableFile = toml::from_str(&contents).map_err(|source| CivicError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_topics(file.topic)?;
        debug!(path = %path.display(), topics = table.len(), "loaded FAQ table");
        Ok(table)
    }

    /// Look up a topic by exact keyword
    pub fn get(&self, keyword: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.keyword == keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl Default for FaqTable {
    fn default() -> Self {
        Self::builtin()
    }
}
