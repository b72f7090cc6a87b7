//! Closed directory-search vocabularies.
//!
//! Callers configure these from strings; the string forms are validated once
//! at the boundary and the rest of the crate only sees the enums.


use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// SearchScope
///
/// Breadth of a directory search below the base DN.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SearchScope {
    #[default]
    Subtree,
    OneLevel,
    Base,
}

impl SearchScope {
    pub const ALL: [Self; 3] = [Self::Subtree, Self::OneLevel, Self::Base];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subtree => "subtree",
            Self::OneLevel => "onelevel",
            Self::Base => "base",
        }
    }
}

impl FromStr for SearchScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidScope {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for SearchScope {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(ConfigError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OrderDirection {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ConvertDirection
///
/// Which way attribute values flow through a converter.
/// Searches only ever read, so the query layer always passes `SearchFrom`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertDirection {
    /// Values are being read from the directory.
    SearchFrom,
    /// Values are being written into a search filter.
    SearchTo,
    Create,
    Modify,
}
