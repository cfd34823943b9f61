//! Usage accounting strategy
//!
//! The deployment selects one strategy at startup; the ledger applies the
//! matching atomic update statement. One interface, no parallel code paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How tenant consumption is accounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountingMode {
    /// Consume from a monthly minutes allocation
    #[default]
    Minutes,
    /// Consume from a prepaid credit balance
    Credits,
}

impl AccountingMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Credits => "credits",
        }
    }
}

impl fmt::Display for AccountingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown accounting mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown accounting mode: {0}")]
pub struct ParseAccountingModeError(pub String);

impl FromStr for AccountingMode {
    type Err = ParseAccountingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutes" => Ok(Self::Minutes),
            "credits" => Ok(Self::Credits),
            other => Err(ParseAccountingModeError(other.to_string())),
        }
    }
}
