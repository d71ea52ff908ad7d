//! Home policy - the constants behind ordering and home-page promotion
//!
//! The defaults are the production business policy. A policy can also be
//! loaded from a JSON file; any field left out keeps its default.
//!
//! ```json
//! { "marker": "#", "promote_all_max": 5, "promote_first": 3 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Delimiter separating an explicit order prefix from the rest of a title
pub const DEFAULT_MARKER: char = '#';

/// Root sets with at most this many nodes are promoted in full
pub const DEFAULT_PROMOTE_ALL_MAX: usize = 5;

/// Number of leading root nodes promoted when nothing is marked
pub const DEFAULT_PROMOTE_FIRST: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomePolicy {
    pub marker: char,
    pub promote_all_max: usize,
    pub promote_first: usize,
}

impl Default for HomePolicy {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            promote_all_max: DEFAULT_PROMOTE_ALL_MAX,
            promote_first: DEFAULT_PROMOTE_FIRST,
        }
    }
}

impl HomePolicy {
    /// Parse and validate a policy from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// A marker must not be something the order parser itself consumes.
    pub fn validate(&self) -> Result<()> {
        let m = self.marker;
        if m.is_whitespace() || m.is_ascii_digit() || m == '+' || m == '-' {
            return Err(Error::InvalidPolicy(format!(
                "marker {:?} would be read as part of an order",
                m
            )));
        }
        Ok(())
    }
}
