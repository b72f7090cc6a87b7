//! Query configuration: the `InvalidConfiguration` error family and
//! file-level defaults applied when a query is constructed.

use crate::directory::SearchScope;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Raised synchronously at configuration time, before any state changes.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("scope '{value}' is invalid; expected one of: subtree, onelevel, base")]
    InvalidScope { value: String },

    #[error("order direction '{value}' is invalid; expected ASC or DESC")]
    InvalidDirection { value: String },

    #[error("order direction '{value}' for attribute '{attribute}' is invalid; expected ASC or DESC")]
    InvalidOrderDirection { attribute: String, value: String },

    #[error("hydrator type '{kind}' is not recognized")]
    UnknownHydrator { kind: String },

    #[error("hydrator type '{kind}' is not supported by this factory")]
    UnsupportedHydrator { kind: &'static str },

    #[error(
        "a scalar result requires exactly one selected attribute, {count} are selected"
    )]
    ScalarRequiresSingleAttribute { count: usize },

    #[error("invalid query configuration: {0}")]
    Parse(String),
}

///
/// QueryDefaults
///
/// Connection-level defaults for new queries. Every field is optional;
/// anything left unset keeps the query's own default.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryDefaults {
    pub scope: Option<SearchScope>,
    pub base_dn: Option<String>,
    pub page_size: Option<u32>,
}

impl QueryDefaults {
    /// Parse defaults from a TOML document.
    ///
    /// ```toml
    /// scope = "onelevel"
    /// base_dn = "ou=people,dc=example,dc=com"
    /// page_size = 500
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
