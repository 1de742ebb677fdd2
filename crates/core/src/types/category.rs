//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// The fixed set of catalog categories.
///
/// Names are case-sensitive and match the catalog data exactly
/// (`STEM`, `Plush`, `Outdoor`, `Puzzles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "STEM")]
    Stem,
    Plush,
    Outdoor,
    Puzzles,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::Stem, Self::Plush, Self::Outdoor, Self::Puzzles];

    /// The category name as it appears in data and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stem => "STEM",
            Self::Plush => "Plush",
            Self::Outdoor => "Outdoor",
            Self::Puzzles => "Puzzles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
