//! Data source identifiers.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the backing business domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Customer records.
    Crm,
    /// Support tickets.
    Support,
    /// Analytics metric points.
    Analytics,
}

impl Source {
    /// Every known source, in registry order.
    pub const ALL: [Source; 3] = [Source::Crm, Source::Support, Source::Analytics];

    /// Wire name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Crm => "crm",
            Source::Support => "support",
            Source::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crm" => Ok(Source::Crm),
            "support" => Ok(Source::Support),
            "analytics" => Ok(Source::Analytics),
            other => Err(QueryError::UnknownSource(other.to_string())),
        }
    }
}
