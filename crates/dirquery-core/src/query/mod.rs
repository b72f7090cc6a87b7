//! Module: query
//! Responsibility: query configuration, attribute resolution, and execution
//! routing to the connection and hydrator.
//! Does not own: the search protocol, paging, value conversion, or schema
//! lookup tables.

mod attributes;
mod order;


pub use attributes::{merge_order_attributes, translate_attributes};
pub use order::OrderBy;

use crate::{
    config::{ConfigError, QueryDefaults},
    connection::{Connection, SearchRequest},
    directory::{ConvertDirection, SearchScope},
    error::{ErrorClass, ErrorOrigin, InternalError},
    hydrate::{HydratorFactory, HydratorKind},
    response::{Hydrated, Record, ResponseError},
    schema::Schema,
    trace::{QueryTraceSink, TraceScope, start_query_trace},
};
use serde_json::Value;
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;
use tracing::{debug, warn};

///
/// QueryError
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("{0}")]
    Response(#[from] ResponseError),

    /// Connection or hydrator failure, exactly as the collaborator reported it.
    #[error("{0}")]
    Execute(#[from] InternalError),
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidConfiguration(_) => ErrorClass::InvalidConfiguration,
            Self::Response(err) => err.class(),
            Self::Execute(err) => err.class,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::InvalidConfiguration(_) => ErrorOrigin::Config,
            Self::Response(_) => ErrorOrigin::Response,
            Self::Execute(err) => err.origin,
        }
    }
}

///
/// Query
///
/// Directory search bound to one connection for its whole lifetime.
/// Setters mutate in place and hand back `&mut Self` so calls chain; a setter
/// that rejects its input leaves every field as it was.
///
/// Each execution reads the current configuration and derives its attribute
/// lists from scratch.
///

pub struct Query<C> {
    connection: Arc<C>,
    hydrators: Arc<dyn HydratorFactory<C>>,
    filter: String,
    base_dn: Option<String>,
    scope: SearchScope,
    page_size: Option<u32>,
    attributes: Vec<String>,
    order_by: OrderBy,
    schemas: Vec<Arc<dyn Schema>>,
    trace: Option<Arc<dyn QueryTraceSink>>,
}

impl<C> Query<C>
where
    C: Connection,
{
    #[must_use]
    pub fn new(connection: Arc<C>, hydrators: Arc<dyn HydratorFactory<C>>) -> Self {
        Self {
            connection,
            hydrators,
            filter: String::new(),
            base_dn: None,
            scope: SearchScope::default(),
            page_size: None,
            attributes: Vec::new(),
            order_by: OrderBy::new(),
            schemas: Vec::new(),
            trace: None,
        }
    }

    /// Construct with connection-level defaults already applied.
    #[must_use]
    pub fn with_defaults(
        connection: Arc<C>,
        hydrators: Arc<dyn HydratorFactory<C>>,
        defaults: &QueryDefaults,
    ) -> Self {
        let mut query = Self::new(connection, hydrators);
        query.base_dn.clone_from(&defaults.base_dn);
        query.page_size = defaults.page_size;
        if let Some(scope) = defaults.scope {
            query.scope = scope;
        }

        query
    }

    #[must_use]
    pub fn with_trace(mut self, sink: Arc<dyn QueryTraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: impl Into<String>) -> &mut Self {
        self.filter = filter.into();
        self
    }

    pub fn set_base_dn(&mut self, base_dn: Option<String>) -> &mut Self {
        self.base_dn = base_dn;
        self
    }

    pub const fn set_page_size(&mut self, page_size: Option<u32>) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Replace the selection verbatim; case and order are kept as given.
    pub fn set_attributes<I, S>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the scope from its string form (`subtree`, `onelevel`, `base`, any case).
    pub fn set_scope(&mut self, scope: &str) -> Result<&mut Self, ConfigError> {
        let scope = scope.parse::<SearchScope>().inspect_err(|err| {
            warn!(error = %err, "rejected search scope");
        })?;

        Ok(self.set_search_scope(scope))
    }

    pub const fn set_search_scope(&mut self, scope: SearchScope) -> &mut Self {
        self.scope = scope;
        self
    }

    /// Replace the schema list. Order matters: only the first schema is used
    /// to translate search attributes, but the hydrator receives all of them.
    pub fn set_schemas<I>(&mut self, schemas: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn Schema>>,
    {
        self.schemas = schemas.into_iter().collect();
        self
    }

    /// Replace the ordering from attribute → direction string pairs.
    ///
    /// Every direction is validated before anything is stored.
    pub fn set_order_by<I, K, D>(&mut self, order_by: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: AsRef<str>,
    {
        let order_by = OrderBy::parse(order_by).inspect_err(|err| {
            warn!(error = %err, "rejected order-by mapping");
        })?;

        Ok(self.set_order(order_by))
    }

    pub fn set_order(&mut self, order_by: OrderBy) -> &mut Self {
        self.order_by = order_by;
        self
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn connection(&self) -> &Arc<C> {
        &self.connection
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn base_dn(&self) -> Option<&str> {
        self.base_dn.as_deref()
    }

    #[must_use]
    pub const fn scope(&self) -> SearchScope {
        self.scope
    }

    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub const fn order_by(&self) -> &OrderBy {
        &self.order_by
    }

    #[must_use]
    pub fn schemas(&self) -> &[Arc<dyn Schema>] {
        &self.schemas
    }

    /// Selection with order-by attributes merged in, as the hydrator sees it.
    #[must_use]
    pub fn selected_attributes(&self) -> Vec<String> {
        merge_order_attributes(&self.attributes, &self.order_by)
    }

    /// Selection as sent to the connection: merged, then translated.
    #[must_use]
    pub fn search_attributes(&self) -> Vec<String> {
        translate_attributes(self.selected_attributes(), &self.schemas)
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Run the search and hydrate every entry with the given hydrator kind.
    pub fn execute(&self, kind: HydratorKind) -> Result<Hydrated, QueryError> {
        let trace = start_query_trace(self.trace.as_ref(), kind, self.scope, self.attributes.len());
        let result = self.execute_traced(kind, trace.as_ref());

        if let Some(trace) = trace {
            match &result {
                Ok(hydrated) => trace.finish(hydrated.count()),
                Err(err) => trace.error(err.class(), err.origin()),
            }
        }

        result
    }

    fn execute_traced(
        &self,
        kind: HydratorKind,
        trace: Option<&TraceScope>,
    ) -> Result<Hydrated, QueryError> {
        let mut hydrator = self.hydrators.get(kind)?;
        let selected = self.selected_attributes();

        hydrator.set_schemas(self.schemas.clone());
        hydrator.set_selected_attributes(selected.clone());
        hydrator.set_connection(Arc::clone(&self.connection));
        hydrator.set_convert_direction(ConvertDirection::SearchFrom);
        hydrator.set_order_by(self.order_by.clone());

        let search_attributes = translate_attributes(selected, &self.schemas);

        debug!(
            filter = %self.filter,
            scope = %self.scope,
            base_dn = ?self.base_dn,
            page_size = ?self.page_size,
            attributes = ?search_attributes,
            hydrator = %kind,
            "executing directory search"
        );

        let raw = self.connection.search(&SearchRequest {
            filter: &self.filter,
            attributes: &search_attributes,
            base_dn: self.base_dn.as_deref(),
            scope: self.scope,
            page_size: self.page_size,
        })?;

        let entries = raw.count();
        if let Some(trace) = trace {
            trace.searched(entries);
        }

        let hydrated = hydrator.hydrate_all(raw)?;
        debug!(entries, rows = hydrated.count(), "hydrated directory search");

        Ok(hydrated)
    }

    /// Execute and require exactly one result.
    pub fn get_single_result(&self, kind: HydratorKind) -> Result<Record, QueryError> {
        Ok(self.execute(kind)?.one()?)
    }

    /// Execute and require at most one result.
    pub fn get_one_or_null_result(&self, kind: HydratorKind) -> Result<Option<Record>, QueryError> {
        Ok(self.execute(kind)?.one_opt()?)
    }

    pub fn get_result(&self) -> Result<Hydrated, QueryError> {
        self.execute(HydratorKind::Object)
    }

    pub fn get_array_result(&self) -> Result<Hydrated, QueryError> {
        self.execute(HydratorKind::Array)
    }

    /// Value of the single selected attribute on the single matching entry.
    pub fn get_single_scalar_result(&self) -> Result<Value, QueryError> {
        let attribute = self.scalar_attribute()?;
        let record = self.get_single_result(HydratorKind::Array)?;

        Ok(scalar_value(record, attribute)?)
    }

    /// Like `get_single_scalar_result`, but no match yields `None`.
    pub fn get_single_scalar_or_null_result(&self) -> Result<Option<Value>, QueryError> {
        let attribute = self.scalar_attribute()?;

        match self.get_one_or_null_result(HydratorKind::Array)? {
            Some(record) => Ok(Some(scalar_value(record, attribute)?)),
            None => Ok(None),
        }
    }

    fn scalar_attribute(&self) -> Result<&str, ConfigError> {
        match self.attributes.as_slice() {
            [attribute] => Ok(attribute),
            selected => Err(ConfigError::ScalarRequiresSingleAttribute {
                count: selected.len(),
            }),
        }
    }
}

fn scalar_value(record: Record, attribute: &str) -> Result<Value, ResponseError> {
    record
        .get(attribute)
        .cloned()
        .ok_or_else(|| ResponseError::AttributeMissing {
            attribute: attribute.to_string(),
        })
}

impl<C> fmt::Debug for Query<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemas: Vec<&str> = self.schemas.iter().map(|s| s.object_type()).collect();

        f.debug_struct("Query")
            .field("filter", &self.filter)
            .field("base_dn", &self.base_dn)
            .field("scope", &self.scope)
            .field("page_size", &self.page_size)
            .field("attributes", &self.attributes)
            .field("order_by", &self.order_by)
            .field("schemas", &schemas)
            .finish_non_exhaustive()
    }
}
