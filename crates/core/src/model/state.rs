use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── COMPLETION STATE ──────────────────────────────────────────────────────────
//

/// How far the student has taken a course.
///
/// States advance in a fixed cycle: not taken, in progress, approved, back to
/// not taken. The serialized literals double as the persisted values and the
/// CLI input vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionState {
    #[default]
    NotTaken,
    InProgress,
    Approved,
}

impl CompletionState {
    /// All states, in cycle order.
    pub const ALL: [CompletionState; 3] = [
        CompletionState::NotTaken,
        CompletionState::InProgress,
        CompletionState::Approved,
    ];

    /// The next state in the cycle.
    ///
    /// Applying this three times returns the starting state.
    #[must_use]
    pub fn successor(self) -> Self {
        match self {
            Self::NotTaken => Self::InProgress,
            Self::InProgress => Self::Approved,
            Self::Approved => Self::NotTaken,
        }
    }

    /// The persisted literal for this state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotTaken => "not-taken",
            Self::InProgress => "in-progress",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a completion state from string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown completion state `{0}`, expected not-taken, in-progress or approved")]
pub struct ParseCompletionStateError(String);

impl FromStr for CompletionState {
    type Err = ParseCompletionStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-taken" => Ok(Self::NotTaken),
            "in-progress" => Ok(Self::InProgress),
            "approved" => Ok(Self::Approved),
            other => Err(ParseCompletionStateError(other.to_string())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
