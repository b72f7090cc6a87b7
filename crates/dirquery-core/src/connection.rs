//! Connection boundary: the transport that actually runs a directory search.
//!
//! The query layer never performs I/O itself. It hands a fully resolved
//! `SearchRequest` to a `Connection` and passes whatever comes back to the
//! hydrator.

use crate::{directory::SearchScope, error::InternalError};
use derive_more::{Deref, IntoIterator};
use std::collections::BTreeMap;

///
/// SearchRequest
///
/// Borrowed view of one search: attribute names here are already
/// directory-native.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchRequest<'a> {
    pub filter: &'a str,
    pub attributes: &'a [String],
    pub base_dn: Option<&'a str>,
    pub scope: SearchScope,
    pub page_size: Option<u32>,
}

///
/// Entry
/// One raw directory entry, values still in wire form.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Entry {
    pub dn: String,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Entry {
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

///
/// SearchResult
/// Raw entries returned by a connection, in server order.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct SearchResult(#[into_iterator(owned, ref)] pub Vec<Entry>);

impl SearchResult {
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.0.len() as u64
    }
}

impl FromIterator<Entry> for SearchResult {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// Connection
///
/// Transport and protocol errors are reported as `InternalError` and travel
/// to the caller unchanged.
///

pub trait Connection {
    fn search(&self, request: &SearchRequest<'_>) -> Result<SearchResult, InternalError>;
}
