//! Recording stubs for the query collaborators.

use crate::{
    config::ConfigError,
    connection::{Connection, Entry, SearchRequest, SearchResult},
    directory::{ConvertDirection, SearchScope},
    error::InternalError,
    hydrate::{Hydrator, HydratorFactory, HydratorKind},
    query::OrderBy,
    response::{Hydrated, Record, RecordCollection},
    schema::Schema,
    trace::{QueryTraceEvent, QueryTraceSink},
};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

///
/// RecordedSearch
/// Owned copy of one `SearchRequest`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedSearch {
    pub filter: String,
    pub attributes: Vec<String>,
    pub base_dn: Option<String>,
    pub scope: SearchScope,
    pub page_size: Option<u32>,
}

///
/// StubConnection
/// Returns a fixed set of entries (or a fixed failure) and records every search.
///

#[derive(Debug, Default)]
pub struct StubConnection {
    entries: Vec<Entry>,
    failure: Option<String>,
    searches: Mutex<Vec<RecordedSearch>>,
}

impl StubConnection {
    pub fn returning(entries: Vec<Entry>) -> Arc<Self> {
        Arc::new(Self {
            entries,
            ..Self::default()
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            ..Self::default()
        })
    }

    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().unwrap().clone()
    }

    pub fn last_search(&self) -> RecordedSearch {
        self.searches().pop().expect("no search was issued")
    }
}

impl Connection for StubConnection {
    fn search(&self, request: &SearchRequest<'_>) -> Result<SearchResult, InternalError> {
        self.searches.lock().unwrap().push(RecordedSearch {
            filter: request.filter.to_string(),
            attributes: request.attributes.to_vec(),
            base_dn: request.base_dn.map(str::to_string),
            scope: request.scope,
            page_size: request.page_size,
        });

        match &self.failure {
            Some(message) => Err(InternalError::transport(message.clone())),
            None => Ok(SearchResult::new(self.entries.clone())),
        }
    }
}

/// Entry with a DN and `cn` / `sn` values.
pub fn person(cn: &str, sn: &str) -> Entry {
    Entry::new(format!("cn={cn},ou=people,dc=example,dc=com"))
        .with_attribute("cn", [cn])
        .with_attribute("sn", [sn])
}

///
/// MapSchema
/// Case-insensitive logical → native lookup; unknown names pass through.
///

#[derive(Debug)]
pub struct MapSchema {
    object_type: String,
    names: BTreeMap<String, String>,
}

impl MapSchema {
    pub fn new(object_type: &str, pairs: &[(&str, &str)]) -> Arc<dyn Schema> {
        Arc::new(Self {
            object_type: object_type.to_string(),
            names: pairs
                .iter()
                .map(|(logical, native)| (logical.to_lowercase(), (*native).to_string()))
                .collect(),
        })
    }
}

impl Schema for MapSchema {
    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn translate_attribute_name(&self, name: &str) -> String {
        self.names
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

///
/// HydratorLog
/// Everything the last hydrator was configured with.
///

#[derive(Clone, Debug, Default)]
pub struct HydratorLog {
    pub kind: Option<HydratorKind>,
    pub schema_types: Vec<String>,
    pub selected: Vec<String>,
    pub connected: bool,
    pub direction: Option<ConvertDirection>,
    pub order_by: OrderBy,
    pub hydrated_entries: Option<usize>,
}

///
/// StubHydrator
///
/// Keys records by logical name, resolving native names through the
/// schemas it was given. Object kind yields a collection, array kind a
/// plain sequence.
///

pub struct StubHydrator<C> {
    kind: HydratorKind,
    log: Arc<Mutex<HydratorLog>>,
    schemas: Vec<Arc<dyn Schema>>,
    selected: Vec<String>,
    connection: Option<Arc<C>>,
    fail: bool,
}

impl<C> StubHydrator<C> {
    fn native_name(&self, logical: &str) -> String {
        self.schemas
            .first()
            .map_or_else(|| logical.to_string(), |schema| {
                schema.translate_attribute_name(logical)
            })
    }

    fn hydrate_entry(&self, entry: Entry) -> Record {
        let mut record = Record::new(Some(entry.dn));

        for logical in &self.selected {
            let native = self.native_name(logical);
            let values = entry
                .attributes
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&native))
                .map(|(_, values)| values.clone());

            if let Some(values) = values {
                let value = match values.as_slice() {
                    [single] => Value::from(single.clone()),
                    _ => Value::from(values),
                };
                record.attributes.insert(logical.clone(), value);
            }
        }

        record
    }
}

impl<C> Hydrator<C> for StubHydrator<C> {
    fn set_schemas(&mut self, schemas: Vec<Arc<dyn Schema>>) {
        self.log.lock().unwrap().schema_types = schemas
            .iter()
            .map(|schema| schema.object_type().to_string())
            .collect();
        self.schemas = schemas;
    }

    fn set_selected_attributes(&mut self, attributes: Vec<String>) {
        self.log.lock().unwrap().selected.clone_from(&attributes);
        self.selected = attributes;
    }

    fn set_connection(&mut self, connection: Arc<C>) {
        self.log.lock().unwrap().connected = true;
        self.connection = Some(connection);
    }

    fn set_convert_direction(&mut self, direction: ConvertDirection) {
        self.log.lock().unwrap().direction = Some(direction);
    }

    fn set_order_by(&mut self, order_by: OrderBy) {
        self.log.lock().unwrap().order_by = order_by;
    }

    fn hydrate_all(&mut self, raw: SearchResult) -> Result<Hydrated, InternalError> {
        assert!(self.connection.is_some(), "hydrator used before connection was set");
        self.log.lock().unwrap().hydrated_entries = Some(raw.len());

        if self.fail {
            return Err(InternalError::hydrator("unable to convert attribute value"));
        }

        let records: Vec<Record> = raw.into_iter().map(|e| self.hydrate_entry(e)).collect();

        Ok(match self.kind {
            HydratorKind::Object => Hydrated::Collection(RecordCollection::new(records)),
            HydratorKind::Array => Hydrated::Sequence(records),
        })
    }
}

///
/// StubFactory
///

#[derive(Default)]
pub struct StubFactory {
    pub log: Arc<Mutex<HydratorLog>>,
    unsupported: Vec<HydratorKind>,
    fail_hydration: bool,
}

impl StubFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn without(kind: HydratorKind) -> Arc<Self> {
        Arc::new(Self {
            unsupported: vec![kind],
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_hydration: true,
            ..Self::default()
        })
    }

    pub fn last(&self) -> HydratorLog {
        self.log.lock().unwrap().clone()
    }
}

impl<C: 'static> HydratorFactory<C> for StubFactory {
    fn get(&self, kind: HydratorKind) -> Result<Box<dyn Hydrator<C>>, ConfigError> {
        if self.unsupported.contains(&kind) {
            return Err(ConfigError::UnsupportedHydrator {
                kind: kind.as_str(),
            });
        }

        *self.log.lock().unwrap() = HydratorLog {
            kind: Some(kind),
            ..HydratorLog::default()
        };

        Ok(Box::new(StubHydrator {
            kind,
            log: Arc::clone(&self.log),
            schemas: Vec::new(),
            selected: Vec::new(),
            connection: None,
            fail: self.fail_hydration,
        }))
    }
}

///
/// RecordingSink
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<QueryTraceEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<QueryTraceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl QueryTraceSink for RecordingSink {
    fn on_event(&self, event: QueryTraceEvent) {
        self.events.lock().unwrap().push(event);
    }
}
