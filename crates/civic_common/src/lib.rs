//! Shared types and matching logic for the Civic Desk chatbot.
//!
//! The answer pipeline is lexical: a keyword containment scan over the FAQ
//! table, then a fuzzy single-token fallback whose suggestion has to be
//! confirmed by the citizen before the answer is revealed.

pub mod citizen;
pub mod config;
pub mod error;
pub mod faq;
pub mod matcher;
pub mod messages;
pub mod session;
pub mod similarity;
pub mod transcript;

pub use citizen::{
    login, Citizen, CitizenDirectory, CitizenId, CsvCitizenStore, InMemoryDirectory,
};
pub use config::CivicConfig;
pub use error::{CivicError, LoginError, Result};
pub use faq::{FaqTable, Topic};
pub use matcher::{match_query, MatchOutcome, Matcher, DEFAULT_CUTOFF};
pub use session::{Reply, Session, SessionState};
pub use transcript::{Actor, Transcript, TranscriptEntry};
