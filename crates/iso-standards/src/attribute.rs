//! Reference attributes (the columns of the reference table).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StandardsError;

/// One projection of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceAttribute {
    /// Common short name ("Bulgaria").
    #[serde(rename = "name")]
    Name,
    /// Official long name ("Republic of Bulgaria").
    #[serde(rename = "official")]
    Official,
    /// ISO-3166 alpha-2 code, the implicit primary key.
    #[serde(rename = "alpha-2")]
    Alpha2,
    /// ISO-3166 alpha-3 code.
    #[serde(rename = "alpha-3")]
    Alpha3,
}

impl ReferenceAttribute {
    /// All attributes in column order.
    pub const ALL: [ReferenceAttribute; 4] = [Self::Name, Self::Official, Self::Alpha2, Self::Alpha3];

    /// CSV header of this attribute.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Official => "official",
            Self::Alpha2 => "alpha-2",
            Self::Alpha3 => "alpha-3",
        }
    }

    /// The other naming attribute, scanned in slow mode.
    ///
    /// Codes have no counterpart.
    pub const fn counterpart(self) -> Option<Self> {
        match self {
            Self::Name => Some(Self::Official),
            Self::Official => Some(Self::Name),
            Self::Alpha2 | Self::Alpha3 => None,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Official => 1,
            Self::Alpha2 => 2,
            Self::Alpha3 => 3,
        }
    }
}

impl fmt::Display for ReferenceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for ReferenceAttribute {
    type Err = StandardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "official" | "official-name" | "official_name" => Ok(Self::Official),
            "alpha-2" | "alpha2" | "alpha_2" => Ok(Self::Alpha2),
            "alpha-3" | "alpha3" | "alpha_3" => Ok(Self::Alpha3),
            _ => Err(StandardsError::UnknownAttribute {
                value: s.to_string(),
            }),
        }
    }
}
