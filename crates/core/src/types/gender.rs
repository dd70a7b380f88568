//! Gender preference for catalog loads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which gendered catalog a load should draw from.
///
/// `Any` resolves to one of the two gendered catalog documents by fair coin,
/// independently on every load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Any,
    Male,
    Female,
}

impl Gender {
    /// The lowercase wire spelling (`any`, `male`, `female`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a gender preference from a string.
#[derive(Debug, Error)]
#[error("unknown gender preference: {0}")]
pub struct GenderParseError(String);

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(GenderParseError(other.to_string())),
        }
    }
}
