//! Tenant category segment
//!
//! Scopes bot configuration defaults and broadcast targeting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business segment a tenant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserCategory {
    #[default]
    Sales,
    Support,
    Operations,
}

impl UserCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Support => "support",
            Self::Operations => "operations",
        }
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for UserCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(Self::Sales),
            "support" => Ok(Self::Support),
            "operations" => Ok(Self::Operations),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}
