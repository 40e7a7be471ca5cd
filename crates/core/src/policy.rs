//! Duplicate-vote policy.
//!
//! The data model does not reject repeated votes by one user; whether the
//! engine does is an explicit configuration choice rather than a schema
//! invariant. The participation guard stays a pure read either way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What `cast_vote` does when the voter has already voted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateVotePolicy {
    /// Record every vote. Callers that want one-vote-per-survey consult
    /// the participation guard themselves.
    #[default]
    Allow,
    /// Reject when the user has any prior vote in the same survey.
    RejectPerSurvey,
    /// Reject only when the user has a prior vote on the same question.
    RejectPerQuestion,
}

impl DuplicateVotePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RejectPerSurvey => "reject_per_survey",
            Self::RejectPerQuestion => "reject_per_question",
        }
    }
}

impl fmt::Display for DuplicateVotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateVotePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "reject_per_survey" => Ok(Self::RejectPerSurvey),
            "reject_per_question" => Ok(Self::RejectPerQuestion),
            other => Err(format!("unknown duplicate vote policy: {other:?}")),
        }
    }
}
