//! ## Crate layout
//! - `core`: query configuration, attribute resolution, collaborator traits,
//!   error taxonomy, and trace hooks.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries what callers need to build and run queries;
//! collaborator implementors usually also want `core::error::InternalError`.

pub use dirquery_core as core;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            config::QueryDefaults,
            connection::{Connection as _, Entry, SearchRequest, SearchResult},
            directory::{ConvertDirection, OrderDirection, SearchScope},
            hydrate::HydratorKind,
            query::{OrderBy, Query},
            response::{Hydrated, Record, RecordCollection},
            schema::Schema as _,
        },
    };
}
