use crate::error::ErrorClass;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a hydrated result.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one result, found 0")]
    EmptyResult,

    #[error("expected exactly one result, found {count}")]
    MultiResult { count: u64 },

    #[error("attribute '{attribute}' is not present on the result")]
    AttributeMissing { attribute: String },
}

impl ResponseError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyResult | Self::AttributeMissing { .. } => ErrorClass::NotFound,
            Self::MultiResult { .. } => ErrorClass::Conflict,
        }
    }
}

///
/// Record
///
/// One hydrated directory entry. Attribute values are whatever the hydrator
/// produced; converters may turn raw strings into numbers, booleans, lists.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    pub dn: Option<String>,
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(dn: Option<String>) -> Self {
        Self {
            dn,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

///
/// RecordCollection
/// Logical collection returned by object hydrators.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct RecordCollection(#[into_iterator(owned, ref)] Vec<Record>);

impl RecordCollection {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.0.len() as u64
    }

    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.0.first()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.0
    }
}

impl FromIterator<Record> for RecordCollection {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// Hydrated
///
/// What a hydrator hands back: either a logical collection or a plain
/// sequence / mapping. Mapping order is insertion order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Hydrated {
    Collection(RecordCollection),
    Sequence(Vec<Record>),
    Mapping(Vec<(String, Record)>),
}

impl Hydrated {
    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn count(&self) -> u64 {
        match self {
            Self::Collection(collection) => collection.count(),
            Self::Sequence(records) => records.len() as u64,
            Self::Mapping(entries) => entries.len() as u64,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count() == 0
    }

    // ------------------------------------------------------------------
    // Cardinality enforcement
    // ------------------------------------------------------------------

    /// Require exactly one result.
    pub fn one(self) -> Result<Record, ResponseError> {
        match self.count() {
            1 => self.first().ok_or(ResponseError::EmptyResult),
            0 => Err(ResponseError::EmptyResult),
            count => Err(ResponseError::MultiResult { count }),
        }
    }

    /// Require at most one result.
    pub fn one_opt(self) -> Result<Option<Record>, ResponseError> {
        match self.count() {
            0 => Ok(None),
            1 => Ok(self.first()),
            count => Err(ResponseError::MultiResult { count }),
        }
    }

    // ------------------------------------------------------------------
    // Non-strict access
    // ------------------------------------------------------------------

    /// NOTE: Bypasses cardinality checks.
    #[must_use]
    pub fn first(self) -> Option<Record> {
        match self {
            Self::Collection(collection) => collection.into_iter().next(),
            Self::Sequence(records) => records.into_iter().next(),
            Self::Mapping(entries) => entries.into_iter().next().map(|(_, record)| record),
        }
    }

    #[must_use]
    pub fn records(self) -> Vec<Record> {
        match self {
            Self::Collection(collection) => collection.into_records(),
            Self::Sequence(records) => records,
            Self::Mapping(entries) => entries.into_iter().map(|(_, record)| record).collect(),
        }
    }
}
