//! Principal identifiers: the stable identity of a caller or account holder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An opaque, stable identifier for a caller or account.
///
/// Principals are compared and hashed by their raw string. A well-formed
/// principal is non-empty and contains no whitespace; [`Principal::parse`]
/// enforces that, [`Principal::new`] does not.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from a raw string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create a principal, rejecting empty identifiers and embedded whitespace.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let principal = Self(raw.into());
        if principal.is_valid() {
            Ok(principal)
        } else {
            Err(TypesError::InvalidPrincipal(principal.0))
        }
    }

    /// Return the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier is well-formed.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
