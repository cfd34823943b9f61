//! Call outcome classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// The contact picked up; counts toward pickup rate and billing
    Answered,
    Failed,
    Busy,
    NoAnswer,
    Voicemail,
}

impl CallOutcome {
    /// Whether this outcome drives usage accounting
    #[inline]
    #[must_use]
    pub fn is_billable(&self) -> bool {
        matches!(self, Self::Answered)
    }

    /// Database/string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::Failed => "failed",
            Self::Busy => "busy",
            Self::NoAnswer => "no_answer",
            Self::Voicemail => "voicemail",
        }
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown outcome string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown call outcome: {0}")]
pub struct ParseOutcomeError(pub String);

impl FromStr for CallOutcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "answered" => Ok(Self::Answered),
            "failed" => Ok(Self::Failed),
            "busy" => Ok(Self::Busy),
            "no_answer" => Ok(Self::NoAnswer),
            "voicemail" => Ok(Self::Voicemail),
            other => Err(ParseOutcomeError(other.to_string())),
        }
    }
}
