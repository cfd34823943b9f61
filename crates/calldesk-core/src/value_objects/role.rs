//! Principal roles
//!
//! A single enumerated role type with one canonical comparison helper,
//! used everywhere a role check is needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular tenant user; scoped to its own data
    #[default]
    Tenant,
    /// Administrator; sees and manages all tenants
    Admin,
    /// Super administrator; same capabilities as Admin
    SuperAdmin,
}

impl Role {
    /// The canonical admin check. All authorization code goes through this
    /// instead of comparing role strings.
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Database/string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tenant" => Ok(Self::Tenant),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
