//! Per-conversation dialogue state.
//!
//! ```text
//!   Idle --(fuzzy suggestion)--> AwaitingConfirmation
//!   AwaitingConfirmation --(yes | no)--> Idle
//!   AwaitingConfirmation --(anything else)--> AwaitingConfirmation
//!   any --(exit)--> Closed
//! ```
//!
//! The pending slot holds at most one candidate topic and is cleared after
//! every yes/no exchange. A confirmed suggestion reveals the bare answer,
//! without the personal greeting a direct hit gets.

use crate::citizen::Citizen;
use crate::faq::Topic;
use crate::matcher::{MatchOutcome, Matcher};
use crate::messages;
use crate::transcript::{Actor, Transcript};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    /// A fuzzy suggestion awaits yes/no
    AwaitingConfirmation { topic: Topic },
    /// The citizen typed `exit`
    Closed,
}

/// What the bot says back for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Keyword found in the query
    Answer { keyword: String, text: String },
    /// Close keyword offered for confirmation
    Suggestion { keyword: String, text: String },
    NotFound { text: String },
    /// Suggestion accepted
    Confirmed { keyword: String, text: String },
    /// Suggestion rejected
    Declined { text: String },
    /// Input while confirming was neither yes nor no
    NeedYesNo { text: String },
    Farewell { text: String },
    /// Input arrived after `exit`
    SessionClosed { text: String },
    /// Blank input while idle
    Empty,
}

impl Reply {
    /// Text to show the citizen, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Answer { text, .. }
            | Reply::Suggestion { text, .. }
            | Reply::NotFound { text }
            | Reply::Confirmed { text, .. }
            | Reply::Declined { text }
            | Reply::NeedYesNo { text }
            | Reply::Farewell { text }
            | Reply::SessionClosed { text } => Some(text),
            Reply::Empty => None,
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Reply::Farewell { .. } | Reply::SessionClosed { .. })
    }
}

/// One citizen's conversation
#[derive(Debug)]
pub struct Session<'a> {
    citizen: Citizen,
    matcher: &'a Matcher,
    state: SessionState,
    transcript: Transcript,
}

impl<'a> Session<'a> {
    pub fn new(citizen: Citizen, matcher: &'a Matcher) -> Self {
        Self {
            citizen,
            matcher,
            state: SessionState::Idle,
            transcript: Transcript::new(),
        }
    }

    pub fn citizen(&self) -> &Citizen {
        &self.citizen
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Keyword awaiting confirmation, if any
    pub fn pending_topic(&self) -> Option<&str> {
        match &self.state {
            SessionState::AwaitingConfirmation { topic } => Some(topic.keyword.as_str()),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Feed one line of citizen input and produce the reply
    pub fn handle(&mut self, input: &str) -> Reply {
        let trimmed = input.trim();
        let query = trimmed.to_lowercase();

        let reply = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Closed => {
                self.state = SessionState::Closed;
                return Reply::SessionClosed {
                    text: messages::SESSION_CLOSED.to_string(),
                };
            }
            _ if query == messages::EXIT_WORD => {
                debug!(citizen = self.citizen.id, "session closed");
                self.state = SessionState::Closed;
                Reply::Farewell {
                    text: messages::farewell(&self.citizen.name),
                }
            }
            SessionState::AwaitingConfirmation { topic } => self.confirm(topic, &query),
            SessionState::Idle if query.is_empty() => return Reply::Empty,
            SessionState::Idle => self.ask(&query),
        };

        self.transcript.push(Actor::You, trimmed);
        if let Some(text) = reply.text() {
            self.transcript.push(Actor::Bot, text);
        }
        reply
    }

    fn ask(&mut self, query: &str) -> Reply {
        let matcher = self.matcher;
        match matcher.match_query(query) {
            MatchOutcome::Direct(topic) => Reply::Answer {
                keyword: topic.keyword.clone(),
                text: messages::greeted_answer(&self.citizen.name, &topic.answer),
            },
            MatchOutcome::Suggest { topic, .. } => {
                let reply = Reply::Suggestion {
                    keyword: topic.keyword.clone(),
                    text: messages::suggestion(&topic.keyword),
                };
                self.state = SessionState::AwaitingConfirmation {
                    topic: topic.clone(),
                };
                reply
            }
            MatchOutcome::NoMatch => Reply::NotFound {
                text: messages::not_found(&self.citizen.name),
            },
        }
    }

    fn confirm(&mut self, topic: Topic, answer: &str) -> Reply {
        match answer {
            messages::YES_WORD => {
                debug!(keyword = %topic.keyword, "suggestion confirmed");
                Reply::Confirmed {
                    keyword: topic.keyword,
                    text: topic.answer,
                }
            }
            messages::NO_WORD => {
                debug!(keyword = %topic.keyword, "suggestion declined");
                Reply::Declined {
                    text: messages::DECLINED.to_string(),
                }
            }
            _ => {
                self.state = SessionState::AwaitingConfirmation { topic };
                Reply::NeedYesNo {
                    text: messages::NEED_YES_NO.to_string(),
                }
            }
        }
    }
}
