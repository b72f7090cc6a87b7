//! Core runtime for dirquery: directory query configuration, attribute
//! resolution, and execution routing over pluggable connection, schema, and
//! hydrator collaborators.

pub mod config;
pub mod connection;
pub mod directory;
pub mod error;
pub mod hydrate;
pub mod query;
pub mod response;
pub mod schema;
pub mod trace;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Vocabulary needed to configure and run a query.
/// Collaborator traits are exported so implementors can bring them in with one import.
///

pub mod prelude {
    pub use crate::{
        connection::{Connection, Entry, SearchRequest, SearchResult},
        directory::{ConvertDirection, OrderDirection, SearchScope},
        hydrate::{Hydrator, HydratorFactory, HydratorKind},
        query::{OrderBy, Query},
        response::{Hydrated, Record, RecordCollection},
        schema::Schema,
    };
}
