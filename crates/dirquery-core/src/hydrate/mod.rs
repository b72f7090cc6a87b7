//! Module: hydrate
//! Responsibility: hydrator kinds and the factory/hydrator contracts.
//! Does not own: value conversion or logical/native name resolution; those
//! belong to hydrator implementations.


use crate::{
    config::ConfigError,
    connection::SearchResult,
    directory::ConvertDirection,
    error::InternalError,
    query::OrderBy,
    response::Hydrated,
    schema::Schema,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

///
/// HydratorKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HydratorKind {
    /// Entries become records gathered in a `RecordCollection`.
    #[default]
    Object,
    /// Entries become a plain sequence of records.
    Array,
}

impl HydratorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl FromStr for HydratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Object, Self::Array]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownHydrator {
                kind: s.to_string(),
            })
    }
}

impl TryFrom<String> for HydratorKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for HydratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Hydrator
///
/// Turns raw search entries into records. A hydrator is configured through
/// its setters once per execution and then asked to hydrate the whole result.
///
/// Selected attributes arrive with their logical names; the hydrator resolves
/// native names itself through the schemas it was given.
///

pub trait Hydrator<C> {
    fn set_schemas(&mut self, schemas: Vec<Arc<dyn Schema>>);

    fn set_selected_attributes(&mut self, attributes: Vec<String>);

    fn set_connection(&mut self, connection: Arc<C>);

    fn set_convert_direction(&mut self, direction: ConvertDirection);

    fn set_order_by(&mut self, order_by: OrderBy);

    fn hydrate_all(&mut self, raw: SearchResult) -> Result<Hydrated, InternalError>;
}

///
/// HydratorFactory
///

pub trait HydratorFactory<C>: Send + Sync {
    fn get(&self, kind: HydratorKind) -> Result<Box<dyn Hydrator<C>>, ConfigError>;
}
